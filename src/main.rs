mod commands;
mod config;
mod export;
mod matcher;
mod model;
mod normalizer;
mod presenter;
mod storage;
mod utils;

use clap::{Parser, Subcommand};
use commands::{MatchRequest, ShareRequest};
use config::{MatchPolicy, load_config};
use std::path::PathBuf;
use std::process::ExitCode;
use storage::JsonFileStorage;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cn100")]
#[command(about = "Normalize the Top 100 dataset and keep its portraits in sync")]
#[command(version)]
struct Cli {
    /// Config file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Source document, overriding `data_path` from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the normalized records and category groups as JSON
    Normalize {
        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the grouped listing
    List,

    /// Print the detail view of one personality
    Show {
        /// Rank of the personality
        #[arg(long)]
        rank: u32,

        /// Also print the share text
        #[arg(long)]
        share: bool,

        /// Link appended to the share text
        #[arg(long)]
        share_url: Option<String>,
    },

    /// Match people to image files and rewrite the source document
    MatchImages {
        /// Image directory, overriding `image_dir` from the config
        #[arg(long)]
        image_dir: Option<PathBuf>,

        /// Override `match_policy` from the config
        #[arg(long, value_enum)]
        policy: Option<MatchPolicy>,

        /// Report matches without writing the document
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries reports and exports
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let storage = JsonFileStorage::new(config.data_path.clone());
    let mut doc = match storage.load() {
        Ok(doc) => doc,
        Err(e) => {
            error!("Failed to load source document: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Normalize { output } => {
            match commands::export(&config, doc.raw(), output.as_deref(), chrono::Utc::now()) {
                Ok(Some(text)) => {
                    println!("{}", text);
                    ExitCode::SUCCESS
                }
                Ok(None) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Export failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::List => {
            print!("{}", commands::list(&config, doc.raw()));
            ExitCode::SUCCESS
        }
        Commands::Show {
            rank,
            share,
            share_url,
        } => {
            let share = share.then(|| ShareRequest {
                url: share_url.as_deref(),
            });
            match commands::show(&config, doc.raw(), rank, share) {
                Ok(text) => {
                    print!("{}", text);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Commands::MatchImages {
            image_dir,
            policy,
            dry_run,
        } => {
            let image_dir = image_dir.unwrap_or_else(|| config.image_dir.clone());
            let req = MatchRequest {
                image_dir: &image_dir,
                image_url_prefix: &config.image_url_prefix,
                policy: policy.unwrap_or(config.match_policy),
                dry_run,
            };
            match commands::match_images(&storage, &mut doc, &req) {
                Ok(report) => {
                    println!("{}", report);
                    if !dry_run {
                        println!();
                        println!("JSON file updated successfully!");
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("Image matching failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
