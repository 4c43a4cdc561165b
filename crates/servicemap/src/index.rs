//! Static service index generation.
//!
//! Static hosting cannot list a directory, so `servicemap index` writes the
//! definition file names to a JSON file the front end fetches first:
//!
//! ```json
//! {
//!   "services": [
//!     "database.yml",
//!     "user-service.yml"
//!   ]
//! }
//! ```

use crate::error::Result;
use crate::loader::{is_service_file, list_service_files};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Contents of the index file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIndexFile {
    /// Definition file names, sorted
    pub services: Vec<String>,
}

impl ServiceIndexFile {
    /// Build an index from arbitrary file names, keeping definitions only.
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut services: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| is_service_file(name))
            .collect();
        services.sort();
        Self { services }
    }

    /// Pretty-printed JSON, two-space indented.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of writing an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexResult {
    /// Directory that was scanned
    pub input_dir: PathBuf,

    /// File that was written
    pub output_file: PathBuf,

    /// What was written
    pub index: ServiceIndexFile,
}

/// Scan `input_dir` and write the index to `output_file`.
///
/// Parent directories of `output_file` are created as needed.
///
/// # Errors
///
/// Returns [`crate::error::Error::NotADirectory`] if `input_dir` is missing,
/// or an IO error if the output cannot be written.
pub async fn generate_index(input_dir: &Path, output_file: &Path) -> Result<IndexResult> {
    let index = ServiceIndexFile::from_file_names(list_service_files(input_dir).await?);

    if let Some(parent) = output_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(output_file, index.to_json()?).await?;

    tracing::info!(
        services = index.services.len(),
        output = %output_file.display(),
        "Wrote service index"
    );

    Ok(IndexResult {
        input_dir: input_dir.to_path_buf(),
        output_file: output_file.to_path_buf(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_names_filters_and_sorts() {
        let index = ServiceIndexFile::from_file_names([
            "user-service.yml",
            "README.md",
            "api-gateway.yaml",
            "index.json",
        ]);

        assert_eq!(index.services, vec!["api-gateway.yaml", "user-service.yml"]);
    }

    #[test]
    fn test_json_format() {
        let index = ServiceIndexFile::from_file_names(["a.yml", "b.yml"]);

        assert_eq!(
            index.to_json().unwrap(),
            "{\n  \"services\": [\n    \"a.yml\",\n    \"b.yml\"\n  ]\n}"
        );
    }

    #[test]
    fn test_empty_index() {
        let index = ServiceIndexFile::from_file_names(Vec::<String>::new());
        assert_eq!(index.to_json().unwrap(), "{\n  \"services\": []\n}");
    }

    #[tokio::test]
    async fn test_generate_index_creates_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("services");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("b.yml"), "").unwrap();
        std::fs::write(input.join("a.yaml"), "").unwrap();
        std::fs::write(input.join("index.json"), "{}").unwrap();
        let output = temp_dir.path().join("public").join("index.json");

        let result = generate_index(&input, &output).await.unwrap();

        assert_eq!(result.index.services, vec!["a.yaml", "b.yml"]);
        let written: ServiceIndexFile =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, result.index);
    }

    #[tokio::test]
    async fn test_generate_index_missing_input() {
        let temp_dir = TempDir::new().unwrap();

        let result =
            generate_index(&temp_dir.path().join("nope"), &temp_dir.path().join("i.json")).await;
        assert!(matches!(result, Err(Error::NotADirectory(_))));
    }
}
