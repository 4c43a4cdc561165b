//! Project configuration.
//!
//! A project is a directory holding `servicemap.yaml`. The file names where
//! service definitions live and where the static service index is written:
//!
//! ```yaml
//! services-dir: services
//! index-file: services/index.json
//! ```
//!
//! Relative paths are resolved against the project root. Without a config
//! file anywhere up the tree, the defaults apply relative to the working
//! directory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "servicemap.yaml";

/// Default directory holding service definition files
pub const DEFAULT_SERVICES_DIR: &str = "services";

/// Default location of the generated service index
pub const DEFAULT_INDEX_FILE: &str = "services/index.json";

/// Maximum directory depth to traverse when searching for the project root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceMapConfig {
    /// Directory with one YAML file per service
    #[serde(rename = "services-dir", default = "default_services_dir")]
    pub services_dir: PathBuf,

    /// Output path for `servicemap index`
    #[serde(rename = "index-file", default = "default_index_file")]
    pub index_file: PathBuf,
}

fn default_services_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SERVICES_DIR)
}

fn default_index_file() -> PathBuf {
    PathBuf::from(DEFAULT_INDEX_FILE)
}

impl Default for ServiceMapConfig {
    fn default() -> Self {
        Self {
            services_dir: default_services_dir(),
            index_file: default_index_file(),
        }
    }
}

impl ServiceMapConfig {
    /// Load configuration from a file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Services directory resolved against `root`.
    pub fn services_dir_in(&self, root: &Path) -> PathBuf {
        root.join(&self.services_dir)
    }

    /// Index file resolved against `root`.
    pub fn index_file_in(&self, root: &Path) -> PathBuf {
        root.join(&self.index_file)
    }
}

/// Find the project root by searching up the directory tree.
///
/// Returns the nearest directory containing [`CONFIG_FILE_NAME`], or `None`
/// if the filesystem root or the depth limit is reached first.
pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}

/// A located project: its root and effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Directory the configuration paths are relative to
    pub root: PathBuf,

    /// Effective configuration (defaults when no file was found)
    pub config: ServiceMapConfig,

    /// Whether a config file was found
    pub configured: bool,
}

impl Project {
    /// Discover the project for `working_dir`.
    pub async fn discover(working_dir: &Path) -> Result<Self> {
        match find_project_root(working_dir) {
            Some(root) => {
                let config = ServiceMapConfig::load(&root.join(CONFIG_FILE_NAME)).await?;
                tracing::debug!(root = %root.display(), "Found project config");
                Ok(Self {
                    root,
                    config,
                    configured: true,
                })
            }
            None => {
                tracing::debug!(
                    dir = %working_dir.display(),
                    "No config found, using defaults"
                );
                Ok(Self {
                    root: working_dir.to_path_buf(),
                    config: ServiceMapConfig::default(),
                    configured: false,
                })
            }
        }
    }

    /// Absolute services directory.
    pub fn services_dir(&self) -> PathBuf {
        self.config.services_dir_in(&self.root)
    }

    /// Absolute index file path.
    pub fn index_file(&self) -> PathBuf {
        self.config.index_file_in(&self.root)
    }
}
