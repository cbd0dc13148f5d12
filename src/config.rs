use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Display order of the category sections on the site.
pub const DEFAULT_CATEGORY_ORDER: &[&str] = &[
    "Person of the Year",
    "Startup Founders",
    "Business Leaders",
    "Tech Founders",
    "Music",
    "Sports Figures",
    "Nollywood",
    "Fashion Innovators",
    "Activists",
    "Health Innovators",
    "Finance",
    "Social Impact",
    "Education",
    "Authors",
    "Science & Research",
    "Journalism",
    "Innovation",
    "Digital Creators",
    "Food",
    "Notable Mentions",
];

/// How the image matcher resolves several plausible files for one person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// First file in sorted order whose key equals or contains a candidate key.
    #[default]
    FirstMatch,
    /// First exactly equal key, then fall back to `FirstMatch`.
    ExactFirst,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub image_dir: PathBuf,
    pub image_url_prefix: String,
    pub placeholder_image: String,
    pub default_role: String,
    pub site_title: String,
    pub match_policy: MatchPolicy,
    pub category_order: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("connect-nigeria-top100-2025.json"),
            image_dir: PathBuf::from("client/public/images/TSMKPedlBkKqvYoV"),
            image_url_prefix: "/images/TSMKPedlBkKqvYoV".to_string(),
            placeholder_image: "/images/placeholder.jpg".to_string(),
            default_role: "Leader".to_string(),
            site_title: "Connect Nigeria Top 100".to_string(),
            match_policy: MatchPolicy::FirstMatch,
            category_order: DEFAULT_CATEGORY_ORDER.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Loads the config file; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.json")).unwrap();
        assert_eq!(cfg.default_role, "Leader");
        assert_eq!(cfg.placeholder_image, "/images/placeholder.jpg");
        assert_eq!(cfg.match_policy, MatchPolicy::FirstMatch);
        assert_eq!(cfg.category_order.first().map(String::as_str), Some("Person of the Year"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_role": "Honoree", "match_policy": "exact-first" }}"#).unwrap();

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.default_role, "Honoree");
        assert_eq!(cfg.match_policy, MatchPolicy::ExactFirst);
        assert_eq!(cfg.image_url_prefix, "/images/TSMKPedlBkKqvYoV");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse { .. })));
    }
}
