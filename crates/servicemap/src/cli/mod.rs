//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for servicemap using clap's derive API.
//! Each command has its own argument struct with validation and helpful error messages.
//!
//! # Commands
//!
//! - `init`: Create `servicemap.yaml` and a services directory
//! - `list`: List loaded services and skipped files
//! - `show`: Show one service with its neighbors
//! - `deps` / `dependents`: Direct neighbors in one direction
//! - `tree`: Transitive dependency tree
//! - `warnings`: Cycles and dangling references
//! - `search`: Text search widened by one hop
//! - `graph`: DOT or JSON render of the whole catalog
//! - `index`: Write the service index file
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--dir`: Project directory (defaults to the current directory)
//!
//! # Example
//!
//! ```bash
//! servicemap init
//! servicemap show user-service
//! servicemap tree api-gateway --depth 2
//! servicemap graph --query payments | dot -Tsvg > services.svg
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Re-export argument structs
pub use args::{
    DependentsArgs, DepsArgs, GraphArgs, IndexArgs, InitArgs, ListArgs, SearchArgs, ShowArgs,
    TreeArgs, WarningsArgs,
};

// Re-export types
pub use types::GraphFormatArg;

// Re-export validators for external use
pub use validators::{validate_query, validate_service_name};

/// Servicemap - browse a catalog of services and their dependencies
///
/// Service definitions are YAML files in the services directory, one per
/// service. The file name is the service name.
#[derive(Parser, Debug)]
#[command(name = "servicemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a servicemap project
    ///
    /// Creates `servicemap.yaml` and an empty services directory. An existing
    /// services directory is left untouched.
    Init(InitArgs),

    /// List all services
    ///
    /// Shows every definition that loaded, followed by the files that were
    /// skipped and why.
    List(ListArgs),

    /// Show a service with its dependencies and dependents
    Show(ShowArgs),

    /// List the direct dependencies of a service
    Deps(DepsArgs),

    /// List the services that depend directly on a service
    Dependents(DependentsArgs),

    /// Show the transitive dependency tree of a service
    ///
    /// Each service appears once, at its shortest distance from the root.
    /// Use `--reverse` to walk dependents instead.
    Tree(TreeArgs),

    /// Report dependency cycles and references to unknown services
    Warnings(WarningsArgs),

    /// Search services by name, description or owner
    Search(SearchArgs),

    /// Render the dependency graph
    ///
    /// DOT output can be piped to Graphviz. With `--query`, services outside
    /// the matched neighborhood are grayed out.
    Graph(GraphArgs),

    /// Write the service index file
    ///
    /// The index lists every definition file name, for static hosting.
    Index(IndexArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let working_dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        match &self.command {
            Some(Commands::Init(args)) => {
                execute::execute_init(&working_dir, args, output_mode).await
            }
            Some(Commands::Index(args)) => {
                execute::execute_index(&working_dir, args, output_mode).await
            }
            Some(Commands::List(_)) => {
                execute::execute_list(&load_app(&working_dir).await?, output_mode)
            }
            Some(Commands::Show(args)) => {
                execute::execute_show(&load_app(&working_dir).await?, args, output_mode)
            }
            Some(Commands::Deps(args)) => {
                execute::execute_deps(&load_app(&working_dir).await?, args, output_mode)
            }
            Some(Commands::Dependents(args)) => {
                execute::execute_dependents(&load_app(&working_dir).await?, args, output_mode)
            }
            Some(Commands::Tree(args)) => {
                execute::execute_tree(&load_app(&working_dir).await?, args, output_mode)
            }
            Some(Commands::Warnings(args)) => {
                execute::execute_warnings(&load_app(&working_dir).await?, args, output_mode)
            }
            Some(Commands::Search(args)) => {
                execute::execute_search(&load_app(&working_dir).await?, args, output_mode)
            }
            Some(Commands::Graph(args)) => {
                execute::execute_graph(&load_app(&working_dir).await?, args, output_mode)
            }
            None => {
                println!("Servicemap service catalog browser");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

/// Load the catalog for `working_dir`, logging each skipped file.
async fn load_app(working_dir: &std::path::Path) -> Result<crate::app::App> {
    let app = crate::app::App::from_directory(working_dir).await?;
    for skipped in app.load_errors() {
        tracing::warn!(
            file = %skipped.file_name,
            error = %skipped.error,
            "Skipped service definition"
        );
    }
    Ok(app)
}
