use crate::model::Personality;
use std::fmt;

/// Text offered when a reader shares one personality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

impl ShareMessage {
    pub fn new(p: &Personality, site_title: &str, year: u32, url: Option<&str>) -> Self {
        Self {
            title: format!("{} {}: {}", site_title, year, p.name),
            text: format!(
                "Check out {}, featured in the {} Personalities of {}!",
                p.name, site_title, year
            ),
            url: url.map(str::to_string),
        }
    }
}

/// Clipboard form: the text, then the link on its own line.
impl fmt::Display for ShareMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(url) = &self.url {
            write!(f, "\n{}", url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Personality {
        Personality {
            id: 3,
            rank: 3,
            name: "Jane Doe".to_string(),
            sector: "Finance".to_string(),
            role: "CEO".to_string(),
            image: "/images/jane_doe.png".to_string(),
            bio: "Built a bank.".to_string(),
            achievements: vec!["Built a bank".to_string()],
            impact: "Built a bank".to_string(),
            category: "Finance".to_string(),
        }
    }

    #[test]
    fn builds_title_and_text() {
        let msg = ShareMessage::new(&jane(), "Connect Nigeria Top 100", 2025, None);
        assert_eq!(msg.title, "Connect Nigeria Top 100 2025: Jane Doe");
        assert_eq!(
            msg.to_string(),
            "Check out Jane Doe, featured in the Connect Nigeria Top 100 Personalities of 2025!"
        );
    }

    #[test]
    fn clipboard_form_appends_url() {
        let msg = ShareMessage::new(&jane(), "CN100", 2025, Some("https://example.org/#3"));
        assert!(msg.to_string().ends_with("2025!\nhttps://example.org/#3"));
    }
}
