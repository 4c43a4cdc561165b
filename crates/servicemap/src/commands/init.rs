//! Implementation of the `init` command.
//!
//! Creates `servicemap.yaml` and an empty services directory in the target
//! directory.

use crate::config::{CONFIG_FILE_NAME, ServiceMapConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the services directory
    pub services_dir: PathBuf,
    /// Whether the services directory already existed
    pub services_dir_existed: bool,
}

/// Check if a directory has a servicemap config.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(CONFIG_FILE_NAME).exists()
}

/// Initialize a servicemap project in `base_dir`.
///
/// An existing services directory is kept as-is, so `init` can be run over a
/// catalog that predates the config file.
///
/// # Errors
///
/// Returns an error if:
/// - `servicemap.yaml` already exists
/// - File system operations fail
pub async fn init(base_dir: &Path, services_dir: Option<&Path>) -> Result<InitResult> {
    if is_initialized(base_dir) {
        return Err(Error::Config(format!(
            "Servicemap is already initialized in this directory. Found existing '{CONFIG_FILE_NAME}'"
        )));
    }

    let mut config = ServiceMapConfig::default();
    if let Some(dir) = services_dir {
        config.index_file = dir.join("index.json");
        config.services_dir = dir.to_path_buf();
    }

    let services_path = config.services_dir_in(base_dir);
    let services_dir_existed = services_path.is_dir();
    fs::create_dir_all(&services_path).await?;

    let config_file = base_dir.join(CONFIG_FILE_NAME);
    config.save(&config_file).await?;

    tracing::debug!(config = %config_file.display(), "Initialized project");

    Ok(InitResult {
        config_file,
        services_dir: services_path,
        services_dir_existed,
    })
}
