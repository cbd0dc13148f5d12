// Build-time export of the normalized records for the static site
use crate::model::{CategoryGroup, Personality, RawDocument};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedExport<'a> {
    pub title: &'a str,
    pub year: u32,
    pub description: &'a str,
    pub generated_at: DateTime<Utc>,
    pub personalities: &'a [Personality],
    pub groups: Vec<GroupIndex>,
}

/// A display group referencing its records by id.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct GroupIndex {
    pub category: String,
    pub ids: Vec<u32>,
}

impl<'a> NormalizedExport<'a> {
    pub fn new(
        doc: &'a RawDocument,
        personalities: &'a [Personality],
        groups: &[CategoryGroup<'_>],
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: &doc.title,
            year: doc.year,
            description: &doc.description,
            generated_at,
            personalities,
            groups: groups
                .iter()
                .map(|g| GroupIndex {
                    category: g.category.clone(),
                    ids: g.items.iter().map(|p| p.id).collect(),
                })
                .collect(),
        }
    }
}
