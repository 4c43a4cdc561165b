//! Loading service definitions into the engine's record type.
//!
//! A [`ServiceSource`] yields raw definition files; [`load_services`] parses
//! and validates each one and keeps the good records. A file that fails is
//! skipped and reported as a [`LoadError`] beside the results, so one broken
//! definition never hides the rest of the catalog.
//!
//! # Example
//!
//! ```no_run
//! use servicemap::loader::{DirectorySource, load_services};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let source = DirectorySource::new(Path::new("services"));
//!     let loaded = load_services(&source).await?;
//!     for error in &loaded.errors {
//!         eprintln!("{}: {}", error.file_name, error.error);
//!     }
//!     println!("{} services", loaded.services.len());
//!     Ok(())
//! }
//! ```

pub mod parse;
pub mod validate;

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use servicemap_graph::Service;
use std::path::{Path, PathBuf};
use tokio::fs;

pub use parse::{ParseError, parse_service_yaml};
pub use validate::{ValidationError, is_valid_service_name, validate_service};

/// A definition file as read from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name including extension (`user-service.yml`)
    pub file_name: String,

    /// Raw file content, or the reason it could not be read
    pub content: std::result::Result<String, String>,
}

/// A place service definition files come from.
///
/// Implementations return definition files only (see [`is_service_file`]),
/// sorted by file name.
#[async_trait]
pub trait ServiceSource: Send + Sync {
    /// Read every definition file.
    ///
    /// # Errors
    ///
    /// Fails only when the source as a whole is unreadable. Problems with a
    /// single file are reported through [`SourceFile::content`].
    async fn files(&self) -> Result<Vec<SourceFile>>;
}

/// Reads `*.yml` and `*.yaml` files from one directory (not recursive).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source for `dir`.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// The directory this source reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ServiceSource for DirectorySource {
    async fn files(&self) -> Result<Vec<SourceFile>> {
        let names = list_service_files(&self.dir).await?;

        let mut files = Vec::with_capacity(names.len());
        for file_name in names {
            let content = fs::read_to_string(self.dir.join(&file_name))
                .await
                .map_err(|e| e.to_string());
            files.push(SourceFile { file_name, content });
        }
        Ok(files)
    }
}

/// Definition files held in memory, for tests and embedding.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    files: Vec<(String, String)>,
}

#[cfg(any(test, feature = "test-util"))]
impl InMemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    #[must_use]
    pub fn with_file(mut self, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((file_name.into(), content.into()));
        self
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl ServiceSource for InMemorySource {
    async fn files(&self) -> Result<Vec<SourceFile>> {
        let mut files: Vec<SourceFile> = self
            .files
            .iter()
            .filter(|(name, _)| is_service_file(name))
            .map(|(name, content)| SourceFile {
                file_name: name.clone(),
                content: Ok(content.clone()),
            })
            .collect();
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }
}

/// A definition file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadError {
    /// File name including extension
    pub file_name: String,

    /// What went wrong (read, parse, or all validation failures joined)
    pub error: String,
}

/// Outcome of loading a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadResult {
    /// Valid services in file-name order
    pub services: Vec<Service>,

    /// Files that were skipped
    pub errors: Vec<LoadError>,
}

/// Whether `file_name` is a service definition (`.yml` or `.yaml`).
pub fn is_service_file(file_name: &str) -> bool {
    service_name_from_file(file_name).is_some()
}

/// The service name a definition file declares: its stem.
///
/// `user-service.yml` gives `user-service`. Returns `None` for other
/// extensions.
pub fn service_name_from_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(".yml")
        .or_else(|| file_name.strip_suffix(".yaml"))
}

/// Sorted definition file names in `dir`.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if `dir` is missing or not a directory.
pub async fn list_service_files(dir: &Path) -> Result<Vec<String>> {
    let is_dir = fs::metadata(dir).await.is_ok_and(|meta| meta.is_dir());
    if !is_dir {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };
        if is_service_file(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Parse and validate one definition file.
pub fn load_service(file_name: &str, content: &str) -> std::result::Result<Service, String> {
    let name = service_name_from_file(file_name).unwrap_or(file_name);
    let service = parse_service_yaml(content, name).map_err(|e| e.to_string())?;

    let violations = validate_service(&service);
    if !violations.is_empty() {
        return Err(validate::describe(&violations));
    }
    Ok(service)
}

/// Load every definition from `source`.
///
/// # Errors
///
/// Fails only if the source itself cannot be read.
pub async fn load_services(source: &dyn ServiceSource) -> Result<LoadResult> {
    let mut result = LoadResult::default();

    for file in source.files().await? {
        let loaded = file
            .content
            .and_then(|content| load_service(&file.file_name, &content));

        match loaded {
            Ok(service) => result.services.push(service),
            Err(error) => {
                tracing::debug!(file = %file.file_name, %error, "Skipping service definition");
                result.errors.push(LoadError {
                    file_name: file.file_name,
                    error,
                });
            }
        }
    }

    tracing::debug!(
        services = result.services.len(),
        errors = result.errors.len(),
        "Loaded service definitions"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const VALID: &str = "\
description: User management
owner: user-team
github: https://github.com/example/user-service
dependencies:
  - database
";

    const DATABASE: &str = "\
description: Primary database
owner: infra-team
github: https://github.com/example/database
";

    // ========== File Name Handling ==========

    #[rstest]
    #[case::yml("user-service.yml", Some("user-service"))]
    #[case::yaml("user-service.yaml", Some("user-service"))]
    #[case::json("index.json", None)]
    #[case::no_extension("README", None)]
    #[case::upper_case_extension("svc.YML", None)]
    fn test_service_name_from_file(#[case] file_name: &str, #[case] expected: Option<&str>) {
        assert_eq!(service_name_from_file(file_name), expected);
    }

    // ========== In-Memory Loading ==========

    #[tokio::test]
    async fn test_load_valid_services_in_file_order() {
        let source = InMemorySource::new()
            .with_file("user-service.yml", VALID)
            .with_file("database.yaml", DATABASE)
            .with_file("index.json", "{}");

        let loaded = load_services(&source).await.unwrap();

        let names: Vec<&str> = loaded.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["database", "user-service"]);
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.services[1].dependencies, vec!["database"]);
    }

    #[tokio::test]
    async fn test_invalid_file_is_reported_and_skipped() {
        let source = InMemorySource::new()
            .with_file("user-service.yml", VALID)
            .with_file("broken.yml", "description: [unclosed")
            .with_file("incomplete.yml", "owner: someone\n");

        let loaded = load_services(&source).await.unwrap();

        assert_eq!(loaded.services.len(), 1);
        assert_eq!(loaded.errors.len(), 2);
        assert_eq!(loaded.errors[0].file_name, "broken.yml");
        assert!(loaded.errors[0].error.starts_with("YAML parse error"));
        assert_eq!(loaded.errors[1].file_name, "incomplete.yml");
        assert!(loaded.errors[1].error.contains("description: required"));
        assert!(loaded.errors[1].error.contains("github: required"));
    }

    #[tokio::test]
    async fn test_invalid_name_from_file_stem() {
        let source = InMemorySource::new().with_file("bad name.yml", VALID);

        let loaded = load_services(&source).await.unwrap();
        assert!(loaded.services.is_empty());
        assert!(loaded.errors[0].error.starts_with("name:"));
    }

    #[tokio::test]
    async fn test_empty_source() {
        let loaded = load_services(&InMemorySource::new()).await.unwrap();
        assert_eq!(loaded, LoadResult::default());
    }

    // ========== Directory Loading ==========

    #[tokio::test]
    async fn test_directory_source() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("user-service.yml"), VALID).unwrap();
        std::fs::write(temp_dir.path().join("database.yml"), DATABASE).unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(temp_dir.path().join("nested.yml")).unwrap();

        let source = DirectorySource::new(temp_dir.path());
        let loaded = load_services(&source).await.unwrap();

        assert_eq!(loaded.services.len(), 2);
        assert_eq!(loaded.services[0].name, "database");
        assert!(loaded.errors.is_empty());
    }

    #[tokio::test]
    async fn test_directory_source_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let source = DirectorySource::new(&temp_dir.path().join("absent"));

        let result = load_services(&source).await;
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }

    #[tokio::test]
    async fn test_list_service_files_rejects_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("services");
        std::fs::write(&file, "").unwrap();

        assert!(matches!(
            list_service_files(&file).await,
            Err(Error::NotADirectory(_))
        ));
    }
}
