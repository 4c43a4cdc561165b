//! Application context for CLI command execution.
//!
//! [`App`] locates the project, loads every service definition once, and
//! answers the lookups commands need. Analysis itself is delegated to
//! `servicemap_graph` on the loaded slice.
//!
//! # Example
//!
//! ```no_run
//! use servicemap::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} services", app.services().len());
//!     Ok(())
//! }
//! ```

use crate::config::Project;
use crate::error::{Error, Result};
use crate::loader::{DirectorySource, LoadError, LoadResult, ServiceSource, load_services};
use servicemap_graph::Service;
use std::path::{Path, PathBuf};

/// Loaded catalog plus the project it came from.
#[derive(Debug)]
pub struct App {
    project: Project,
    loaded: LoadResult,
}

impl App {
    /// Create an App for `working_dir`.
    ///
    /// Searches up the tree for `servicemap.yaml` (falling back to defaults
    /// relative to `working_dir`) and loads the services directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or the services
    /// directory cannot be read. Individual bad definitions are not errors;
    /// see [`App::load_errors`].
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let project = Project::discover(working_dir).await?;
        let source = DirectorySource::new(&project.services_dir());
        Self::from_source(project, &source).await
    }

    /// Create an App from an explicit project and source.
    pub async fn from_source(project: Project, source: &dyn ServiceSource) -> Result<Self> {
        let loaded = load_services(source).await?;
        Ok(Self { project, loaded })
    }

    /// All valid services, in file-name order.
    pub fn services(&self) -> &[Service] {
        &self.loaded.services
    }

    /// Definition files that were skipped.
    pub fn load_errors(&self) -> &[LoadError] {
        &self.loaded.errors
    }

    /// Look up a service by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceNotFound`] if no loaded service has the name.
    pub fn service(&self, name: &str) -> Result<&Service> {
        self.loaded
            .services
            .iter()
            .find(|service| service.name == name)
            .ok_or_else(|| Error::ServiceNotFound(name.to_string()))
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.project.root
    }

    /// Resolved services directory.
    pub fn services_dir(&self) -> PathBuf {
        self.project.services_dir()
    }

    /// Resolved index file path.
    pub fn index_file(&self) -> PathBuf {
        self.project.index_file()
    }
}
