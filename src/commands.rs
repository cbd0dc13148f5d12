// Subcommand bodies, kept apart from argument parsing and printing
use crate::config::{AppConfig, MatchPolicy};
use crate::export::NormalizedExport;
use crate::matcher::{ImagePool, MatchReport, match_document};
use crate::model::{CommandError, Personality, RawDocument, SourceDocument};
use crate::normalizer::{NormalizeOptions, group_by_category, normalize_document};
use crate::presenter::{Detail, Listing, ShareMessage, find_by_rank};
use crate::storage::JsonFileStorage;
use crate::storage::json_file::{to_pretty_json, write_json};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{info, warn};

pub fn normalize(config: &AppConfig, doc: &RawDocument) -> Vec<Personality> {
    let opts = NormalizeOptions {
        default_role: config.default_role.clone(),
        placeholder_image: config.placeholder_image.clone(),
    };
    normalize_document(doc, &opts)
}

/// Writes the export to `output`, or returns it when there is no output file.
pub fn export(
    config: &AppConfig,
    doc: &RawDocument,
    output: Option<&Path>,
    generated_at: DateTime<Utc>,
) -> Result<Option<String>, CommandError> {
    let records = normalize(config, doc);
    let groups = group_by_category(&records, &config.category_order);
    let export = NormalizedExport::new(doc, &records, &groups, generated_at);
    info!("Exporting {} personalities in {} groups", records.len(), groups.len());

    match output {
        Some(path) => {
            write_json(path, &export, b"  ")?;
            info!("Wrote {}", path.display());
            Ok(None)
        }
        None => {
            let bytes = to_pretty_json(&export, b"  ")?;
            Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
        }
    }
}

pub fn list(config: &AppConfig, doc: &RawDocument) -> String {
    let records = normalize(config, doc);
    let groups = group_by_category(&records, &config.category_order);
    Listing(&groups).to_string()
}

/// Share text options for [`show`].
pub struct ShareRequest<'a> {
    pub url: Option<&'a str>,
}

pub fn show(
    config: &AppConfig,
    doc: &RawDocument,
    rank: u32,
    share: Option<ShareRequest<'_>>,
) -> Result<String, CommandError> {
    let records = normalize(config, doc);
    let p = find_by_rank(&records, rank).ok_or(CommandError::UnknownRank {
        rank,
        total: records.len(),
    })?;

    let mut out = Detail(p).to_string();
    if let Some(share) = share {
        let msg = ShareMessage::new(p, &config.site_title, doc.year, share.url);
        out.push_str(&format!("\nShare: {}\n{}\n", msg.title, msg));
    }
    Ok(out)
}

/// Options for [`match_images`].
pub struct MatchRequest<'a> {
    pub image_dir: &'a Path,
    pub image_url_prefix: &'a str,
    pub policy: MatchPolicy,
    pub dry_run: bool,
}

/// Matches people to images and saves the document unless this is a dry run.
pub fn match_images(
    storage: &JsonFileStorage,
    doc: &mut SourceDocument,
    req: &MatchRequest<'_>,
) -> Result<MatchReport, CommandError> {
    info!("Reading images from {}", req.image_dir.display());
    let pool = ImagePool::from_dir(req.image_dir)?;
    if pool.is_empty() {
        warn!("No image files in {}", req.image_dir.display());
    }

    let report = match_document(doc, &pool, req.image_url_prefix, req.policy);

    if req.dry_run {
        info!("Dry run, {} left unchanged", storage.path().display());
    } else {
        storage.save(doc)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    const DOC: &str = r#"{
    "title": "Top 100",
    "year": 2025,
    "personOfTheYear": {
        "name": "Ada Obi",
        "category": "Governance",
        "description": "Reformed the civil service."
    },
    "categories": [
        {
            "category": "Finance",
            "people": [
                {
                    "name": "Jane Doe",
                    "achievement": "Built a bank. Funded startups.",
                    "company": "Acme",
                    "image": null
                },
                {
                    "name": "Tunde Ade",
                    "achievement": "Ran a fund."
                }
            ]
        }
    ]
}"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        storage: JsonFileStorage,
        images: std::path::PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.json");
        fs::write(&data, DOC).unwrap();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("jane_doe.png"), b"").unwrap();
        fs::write(images.join("ada_obi.jpg"), b"").unwrap();
        Fixture {
            _dir: dir,
            storage: JsonFileStorage::new(data),
            images,
        }
    }

    fn request(images: &Path, dry_run: bool) -> MatchRequest<'_> {
        MatchRequest {
            image_dir: images,
            image_url_prefix: "/images/set",
            policy: MatchPolicy::FirstMatch,
            dry_run,
        }
    }

    #[test]
    fn dry_run_reports_but_leaves_file_untouched() {
        let fx = fixture();
        let mut doc = fx.storage.load().unwrap();

        let report = match_images(&fx.storage, &mut doc, &request(&fx.images, true)).unwrap();

        assert_eq!(report.total_matched(), 2);
        assert_eq!(fs::read_to_string(fx.storage.path()).unwrap(), DOC);
    }

    #[test]
    fn normal_run_rewrites_only_images() {
        let fx = fixture();
        let mut doc = fx.storage.load().unwrap();

        let report = match_images(&fx.storage, &mut doc, &request(&fx.images, false)).unwrap();
        assert_eq!(report.total_people(), 3);
        assert_eq!(report.total_matched(), 2);

        let expected = DOC
            .replace(
                r#""image": null"#,
                r#""image": "/images/set/jane_doe.png""#,
            )
            .replace(
                r#""description": "Reformed the civil service."
"#,
                r#""description": "Reformed the civil service.",
        "image": "/images/set/ada_obi.jpg"
"#,
            );
        assert_eq!(fs::read_to_string(fx.storage.path()).unwrap(), expected);
    }

    #[test]
    fn missing_image_dir_fails_without_writing() {
        let fx = fixture();
        let mut doc = fx.storage.load().unwrap();
        let missing = fx.images.join("nope");

        let result = match_images(&fx.storage, &mut doc, &request(&missing, false));

        assert!(matches!(result, Err(CommandError::Match(_))));
        assert_eq!(fs::read_to_string(fx.storage.path()).unwrap(), DOC);
    }

    #[test]
    fn show_renders_detail_and_share_text() {
        let fx = fixture();
        let doc = fx.storage.load().unwrap();
        let config = AppConfig::default();

        let out = show(&config, doc.raw(), 2, Some(ShareRequest { url: None })).unwrap();

        assert!(out.starts_with("#2 • Finance\nJane Doe\nAcme\n"));
        assert!(out.ends_with(
            "\nShare: Connect Nigeria Top 100 2025: Jane Doe\n\
             Check out Jane Doe, featured in the Connect Nigeria Top 100 Personalities of 2025!\n"
        ));
    }

    #[test]
    fn show_unknown_rank_is_an_error() {
        let fx = fixture();
        let doc = fx.storage.load().unwrap();

        let result = show(&AppConfig::default(), doc.raw(), 9, None);

        assert!(matches!(
            result,
            Err(CommandError::UnknownRank { rank: 9, total: 3 })
        ));
    }

    #[test]
    fn list_groups_in_display_order() {
        let fx = fixture();
        let doc = fx.storage.load().unwrap();

        let out = list(&AppConfig::default(), doc.raw());

        assert!(out.starts_with("== Person of the Year (#person-of-the-year) ==\n  #1   Ada Obi (Governance)\n"));
        assert!(out.contains("== Finance (#finance) ==\n  #2   Jane Doe (Acme)\n  #3   Tunde Ade (Leader)\n"));
    }

    #[test]
    fn export_to_file_or_string() {
        let fx = fixture();
        let doc = fx.storage.load().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let config = AppConfig::default();

        let text = export(&config, doc.raw(), None, at).unwrap().unwrap();
        assert!(text.contains("\"generatedAt\": \"2025-01-01T00:00:00Z\""));

        let out = fx.storage.path().with_file_name("export.json");
        assert!(export(&config, doc.raw(), Some(&out), at).unwrap().is_none());
        assert_eq!(fs::read_to_string(&out).unwrap(), text);
    }
}
