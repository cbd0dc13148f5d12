// Core structs: SourceDocument, RawDocument, Personality, error types
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Typed view of the hand-authored source document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub person_of_the_year: Option<RawPersonOfTheYear>,
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawPersonOfTheYear {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawCategory {
    pub category: String,
    pub people: Vec<RawPerson>,
}

/// One listed person. Exactly which of `title`, `company`, `work` or `focus`
/// carries the role varies from entry to entry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawPerson {
    pub name: String,
    pub achievement: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Where a person sits in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonSlot {
    PersonOfTheYear,
    Listed { category: usize, person: usize },
}

/// The source document as authored, plus its typed view.
///
/// Edits go through both so that saving writes back the authored tree with
/// only the edited values changed: key order, nulls and unknown keys stay.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    tree: Value,
    raw: RawDocument,
}

impl SourceDocument {
    pub fn from_value(tree: Value) -> Result<Self, serde_json::Error> {
        let raw = RawDocument::deserialize(&tree)?;
        Ok(Self { tree, raw })
    }

    pub fn raw(&self) -> &RawDocument {
        &self.raw
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Every person in emission order with their slot.
    pub fn people(&self) -> Vec<(PersonSlot, &str)> {
        let poy = self
            .raw
            .person_of_the_year
            .iter()
            .map(|poy| (PersonSlot::PersonOfTheYear, poy.name.as_str()));
        let listed = self.raw.categories.iter().enumerate().flat_map(|(c, group)| {
            group.people.iter().enumerate().map(move |(p, person)| {
                (
                    PersonSlot::Listed {
                        category: c,
                        person: p,
                    },
                    person.name.as_str(),
                )
            })
        });
        poy.chain(listed).collect()
    }

    /// Sets `image` of one person. A key that did not exist is appended to
    /// the person's object.
    pub fn set_image(&mut self, slot: PersonSlot, path: String) {
        let pointer = match slot {
            PersonSlot::PersonOfTheYear => {
                if let Some(poy) = self.raw.person_of_the_year.as_mut() {
                    poy.image = Some(path.clone());
                }
                "/personOfTheYear".to_string()
            }
            PersonSlot::Listed { category, person } => {
                if let Some(p) = self
                    .raw
                    .categories
                    .get_mut(category)
                    .and_then(|g| g.people.get_mut(person))
                {
                    p.image = Some(path.clone());
                }
                format!("/categories/{}/people/{}", category, person)
            }
        };
        if let Some(object) = self.tree.pointer_mut(&pointer).and_then(Value::as_object_mut) {
            object.insert("image".to_string(), Value::String(path));
        }
    }
}

/// Uniform display record handed to the view layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Personality {
    pub id: u32,
    pub rank: u32,
    pub name: String,
    pub sector: String,
    pub role: String,
    pub image: String,
    pub bio: String,
    pub achievements: Vec<String>,
    pub impact: String,
    pub category: String,
}

/// Records sharing one display category, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: String,
    pub items: Vec<&'a Personality>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("cannot read image directory {}: {source}", .path.display())]
    ImageDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no personality with rank {rank} ({total} records)")]
    UnknownRank { rank: u32, total: usize },
}
