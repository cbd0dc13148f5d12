use crate::matcher::names::normalize_name;
use crate::model::MatchError;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    /// Normalized file name without its extension.
    pub key: String,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let key = normalize_name(strip_extension(&file_name));
        Self { file_name, key }
    }
}

/// Candidate image files sorted by file name, so matching does not depend
/// on directory listing order.
#[derive(Debug, Clone, Default)]
pub struct ImagePool {
    files: Vec<ImageFile>,
}

impl ImagePool {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<ImageFile> = names.into_iter().map(ImageFile::new).collect();
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Self { files }
    }

    /// Reads the regular files of `dir`. Subdirectories and names that are
    /// not valid UTF-8 are skipped.
    pub fn from_dir(dir: &Path) -> Result<Self, MatchError> {
        let to_err = |source: std::io::Error| MatchError::ImageDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(to_err)? {
            let entry = entry.map_err(to_err)?;
            if !entry.file_type().map_err(to_err)?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        Ok(Self::from_names(names))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageFile> {
        self.files.iter()
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_drops_extension() {
        assert_eq!(ImageFile::new("Jane_Doe.PNG").key, "jane_doe");
        assert_eq!(ImageFile::new("jane doe ceo.jpeg").key, "jane_doe_ceo");
        assert_eq!(ImageFile::new("jane.doe.webp").key, "janedoe");
        assert_eq!(ImageFile::new("noext").key, "noext");
        assert_eq!(ImageFile::new(".hidden").key, "hidden");
    }

    #[test]
    fn names_are_sorted() {
        let pool = ImagePool::from_names(["b.png", "a.png", "c.png"]);
        let names: Vec<&str> = pool.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn reads_only_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("z.png"), b"").unwrap();
        fs::write(dir.path().join("a.jpg"), b"").unwrap();
        fs::create_dir(dir.path().join("thumbs")).unwrap();

        let pool = ImagePool::from_dir(dir.path()).unwrap();
        let names: Vec<&str> = pool.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "z.png"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let result = ImagePool::from_dir(Path::new("/nonexistent/cn100/images"));
        assert!(matches!(result, Err(MatchError::ImageDir { .. })));
    }
}
