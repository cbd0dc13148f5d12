use crate::model::{SourceDocument, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// The source document on disk.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document. A document without `categories` is rejected here.
    pub fn load(&self) -> Result<SourceDocument, StorageError> {
        let tree: Value = read_json(&self.path)?;
        let doc = SourceDocument::from_value(tree).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        info!(
            "Loaded {} with {} categories",
            self.path.display(),
            doc.raw().categories.len()
        );
        Ok(doc)
    }

    /// Replaces the document with its authored tree, indented with four spaces.
    pub fn save(&self, doc: &SourceDocument) -> Result<(), StorageError> {
        write_json(&self.path, doc.tree(), b"    ")?;
        info!("Saved {}", self.path.display());
        Ok(())
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-prints `value` with the given indent and atomically replaces `path`
/// with it through a temporary file in the same directory.
pub fn write_json<T: Serialize>(path: &Path, value: &T, indent: &[u8]) -> Result<(), StorageError> {
    let bytes = to_pretty_json(value, indent).map_err(|source| StorageError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let io_err = |source: std::io::Error| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

pub fn to_pretty_json<T: Serialize>(value: &T, indent: &[u8]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent));
    value.serialize(&mut ser)?;
    Ok(buf)
}
