// Matcher module: associates people in the source document with image files.

pub mod image_pool;
pub mod names;

pub use image_pool::{ImageFile, ImagePool};

use crate::config::MatchPolicy;
use crate::model::{PersonSlot, SourceDocument};
use names::name_variants;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub name: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub outcomes: Vec<MatchOutcome>,
    pub total_images: usize,
    /// Whether the first outcome belongs to the person of the year.
    pub includes_person_of_the_year: bool,
}

impl MatchReport {
    pub fn total_people(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_matched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.file_name.is_some()).count()
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.file_name {
                Some(file) => writeln!(f, "✓ Matched: {} -> {}", outcome.name, file)?,
                None => writeln!(f, "✗ No match found for: {}", outcome.name)?,
            }
        }
        writeln!(f)?;
        writeln!(f, "=== Summary ===")?;
        if self.includes_person_of_the_year {
            writeln!(f, "Total people: {} (including person of the year)", self.total_people())?;
        } else {
            writeln!(f, "Total people: {}", self.total_people())?;
        }
        writeln!(f, "Total matched: {}", self.total_matched())?;
        write!(f, "Total images available: {}", self.total_images)
    }
}

/// Picks the image for one person from the candidate keys of their name.
pub fn find_match<'a>(pool: &'a ImagePool, keys: &[String], policy: MatchPolicy) -> Option<&'a ImageFile> {
    let exact = || pool.iter().find(|file| keys.iter().any(|k| file.key == *k));
    let containing = || pool.iter().find(|file| keys.iter().any(|k| file.key.contains(k.as_str())));

    match policy {
        MatchPolicy::FirstMatch => containing(),
        MatchPolicy::ExactFirst => exact().or_else(containing),
    }
}

/// Resolves images for the person of the year and every listed person,
/// rewriting `image` to `{prefix}/{file_name}` on a match. Unmatched people
/// keep their current image.
pub fn match_document(
    doc: &mut SourceDocument,
    pool: &ImagePool,
    image_url_prefix: &str,
    policy: MatchPolicy,
) -> MatchReport {
    let prefix = image_url_prefix.trim_end_matches('/');
    let mut report = MatchReport {
        outcomes: Vec::new(),
        total_images: pool.len(),
        includes_person_of_the_year: doc.raw().person_of_the_year.is_some(),
    };

    let mut updates: Vec<(PersonSlot, String)> = Vec::new();
    for (slot, name) in doc.people() {
        let keys = name_variants(name);
        debug!("Candidate keys for {}: {:?}", name, keys);

        let file_name = find_match(pool, &keys, policy).map(|file| file.file_name.clone());
        if let Some(file) = &file_name {
            updates.push((slot, format!("{}/{}", prefix, file)));
        }
        report.outcomes.push(MatchOutcome {
            name: name.to_string(),
            file_name,
        });
    }

    for (slot, path) in updates {
        doc.set_image(slot, path);
    }

    info!(
        "Matched {} of {} people against {} images",
        report.total_matched(),
        report.total_people(),
        report.total_images
    );
    report
}
