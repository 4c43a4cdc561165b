//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::types::GraphFormatArg;
use super::validators::{validate_query, validate_service_name};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Services directory, relative to the project root
    ///
    /// Defaults to `services`. The index file is placed inside it.
    #[arg(short, long)]
    pub services_dir: Option<PathBuf>,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Service name to display
    #[arg(value_parser = validate_service_name)]
    pub name: String,
}

/// Arguments for the `deps` command
#[derive(Parser, Debug, Clone)]
pub struct DepsArgs {
    /// Service whose dependencies to list
    #[arg(value_parser = validate_service_name)]
    pub name: String,
}

/// Arguments for the `dependents` command
#[derive(Parser, Debug, Clone)]
pub struct DependentsArgs {
    /// Service whose dependents to list
    #[arg(value_parser = validate_service_name)]
    pub name: String,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Root service of the tree
    #[arg(value_parser = validate_service_name)]
    pub name: String,

    /// Follow dependents instead of dependencies
    #[arg(short, long)]
    pub reverse: bool,

    /// Maximum depth to walk (1 = direct neighbors only)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub depth: Option<u16>,
}

/// Arguments for the `warnings` command
#[derive(Parser, Debug, Clone)]
pub struct WarningsArgs {
    /// Report each strongly connected component as its own cycle warning
    ///
    /// By default every service on any cycle is folded into one warning.
    #[arg(long)]
    pub per_cycle: bool,

    /// Exit with an error when any warning is found
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `search` command
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Text to look for in names, descriptions and owners
    ///
    /// Case-insensitive substring match. Matches are widened to their direct
    /// dependencies and dependents.
    #[arg(value_parser = validate_query)]
    pub query: String,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Output format (ignored with --json, which always emits JSON)
    #[arg(short, long, value_enum, default_value = "dot")]
    pub format: GraphFormatArg,

    /// Highlight the neighborhood of services matching this query
    #[arg(short, long, value_parser = validate_query)]
    pub query: Option<String>,
}

/// Arguments for the `index` command
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Directory to scan (defaults to the configured services directory)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// File to write (defaults to the configured index file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
