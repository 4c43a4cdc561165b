//! Output formatting for CLI commands.
//!
//! This module provides utilities for formatting command output in both
//! human-readable text format and JSON format for programmatic use.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers (semantic colors, icons)
//! - [`dot`]: Graphviz rendering of the whole catalog
//! - [`tree`]: Dependency tree rendering with ASCII/Unicode connectors

pub mod color;
pub mod dot;
pub mod tree;

use crate::loader::LoadError;
use serde::Serialize;
use servicemap_graph::{SearchResult, Service, Warning};
use std::collections::HashSet;
use std::env;
use std::io::{self, Write};

pub use color::{error, info, success, warning};
pub use dot::render_dot;
pub use tree::print_tree;

use color::{
    bold, colored_warning_icon, colorize_name, dimmed, in_arrow, missing_marker, out_arrow,
};

// ============================================================================
// Output Configuration
// ============================================================================

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
///
/// Holds settings that control how output is formatted: terminal width
/// limit, ASCII fallback mode, and color output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new `OutputConfig` with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `SERVICEMAP_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `SERVICEMAP_ASCII`: Set to "1" or "true" for ASCII-only icons (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `SERVICEMAP_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_width = match lookup("SERVICEMAP_MAX_WIDTH") {
            Some(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "SERVICEMAP_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match lookup("SERVICEMAP_ASCII") {
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Some(v) => {
                tracing::warn!(
                    env_var = "SERVICEMAP_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            None => false,
        };

        // https://no-color.org/
        let use_colors = lookup("NO_COLOR").is_none()
            && lookup("SERVICEMAP_COLOR")
                .is_none_or(|v| v != "0" && !v.eq_ignore_ascii_case("false"));

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

// ============================================================================
// Terminal Width Detection
// ============================================================================

/// Get the current terminal width, falling back to default if detection fails.
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| w.0)
        .into()
}

/// Wrap text to fit within a given width, preserving existing line breaks.
/// Uses textwrap to handle edge cases like long words (URLs, file paths).
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width)
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}

// ============================================================================
// Public Dispatch Functions
// ============================================================================

/// Print every loaded service, then any skipped files.
pub fn print_services(
    services: &[Service],
    errors: &[LoadError],
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => {
            print_services_text(&mut handle, services, &config)?;
            print_load_errors_text(&mut handle, errors, &config)
        }
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({ "services": services, "errors": errors }),
        ),
    }
}

/// Print one service with its direct neighborhood.
///
/// `known` answers whether a dependency name resolves, so dangling entries
/// can be marked.
pub fn print_service_details(
    service: &Service,
    dependents: &[String],
    known: &dyn Fn(&str) -> bool,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => {
            print_service_details_text(&mut handle, service, dependents, known, &config)
        }
        OutputMode::Json => {
            let missing: Vec<&str> = service
                .dependencies
                .iter()
                .map(String::as_str)
                .filter(|dep| !known(dep))
                .collect();
            write_json(
                &mut handle,
                &serde_json::json!({
                    "name": service.name,
                    "description": service.description,
                    "owner": service.owner,
                    "github": service.github,
                    "dependencies": service.dependencies,
                    "dependents": dependents,
                    "missing": missing,
                }),
            )
        }
    }
}

/// Which side of a service a name list describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// What the service depends on
    Dependencies,
    /// What depends on the service
    Dependents,
}

impl Relation {
    fn key(self) -> &'static str {
        match self {
            Self::Dependencies => "dependencies",
            Self::Dependents => "dependents",
        }
    }
}

/// Print the direct dependencies or dependents of `name`.
pub fn print_relations(
    name: &str,
    relation: Relation,
    names: &[String],
    known: &dyn Fn(&str) -> bool,
    mode: OutputMode,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_relations_text(&mut handle, name, relation, names, known, &config),
        OutputMode::Json => {
            let mut value = serde_json::json!({ "service": name });
            value[relation.key()] = serde_json::json!(names);
            write_json(&mut handle, &value)
        }
    }
}

/// Print analysis warnings.
pub fn print_warnings(warnings: &[Warning], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_warnings_text(&mut handle, warnings, &config),
        OutputMode::Json => write_json(&mut handle, &serde_json::json!({ "warnings": warnings })),
    }
}

/// Print a search result against the catalog it ran on.
pub fn print_search(result: &SearchResult, services: &[Service], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_search_text(&mut handle, result, services, &config),
        OutputMode::Json => write_json(&mut handle, result),
    }
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value)
}

pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(w, "{json}")
}

// ============================================================================
// Text Formatting
// ============================================================================

fn print_services_text<W: Write>(
    w: &mut W,
    services: &[Service],
    config: &OutputConfig,
) -> io::Result<()> {
    if services.is_empty() {
        writeln!(w, "No services found.")?;
        return Ok(());
    }

    writeln!(w, "Found {} service(s):", services.len())?;
    writeln!(w)?;

    let width = services
        .iter()
        .map(|service| service.name.chars().count())
        .max()
        .unwrap_or(0);

    for service in services {
        let padding = " ".repeat(width - service.name.chars().count());
        writeln!(
            w,
            "  {}{}  {}  {}",
            colorize_name(&service.name, config),
            padding,
            dimmed(&format!("[{}]", service.owner), config),
            dimmed(&format!("{} dep(s)", service.dependencies.len()), config),
        )?;
    }

    Ok(())
}

fn print_load_errors_text<W: Write>(
    w: &mut W,
    errors: &[LoadError],
    config: &OutputConfig,
) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} ({}):",
        error("Skipped definition files", config),
        errors.len()
    )?;
    for load_error in errors {
        writeln!(
            w,
            "  {} {}",
            bold(&load_error.file_name, config),
            load_error.error
        )?;
    }
    Ok(())
}

fn print_service_details_text<W: Write>(
    w: &mut W,
    service: &Service,
    dependents: &[String],
    known: &dyn Fn(&str) -> bool,
    config: &OutputConfig,
) -> io::Result<()> {
    let content_width = get_terminal_width().min(config.max_width);

    writeln!(w, "{}", bold(&colorize_name(&service.name, config), config))?;
    writeln!(w, "{} {}", dimmed("Owner:", config), service.owner)?;
    writeln!(w, "{} {}", dimmed("GitHub:", config), service.github)?;

    if !service.description.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Description", config))?;
        for line in wrap_text(&service.description, content_width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} ({}):",
        bold("Dependencies", config),
        service.dependencies.len()
    )?;
    print_name_lines(w, &service.dependencies, &out_arrow(config), known, config)?;

    writeln!(w)?;
    writeln!(w, "{} ({}):", bold("Dependents", config), dependents.len())?;
    print_name_lines(w, dependents, &in_arrow(config), known, config)?;

    Ok(())
}

fn print_relations_text<W: Write>(
    w: &mut W,
    name: &str,
    relation: Relation,
    names: &[String],
    known: &dyn Fn(&str) -> bool,
    config: &OutputConfig,
) -> io::Result<()> {
    let (title, arrow) = match relation {
        Relation::Dependencies => ("depends on", out_arrow(config)),
        Relation::Dependents => ("is depended on by", in_arrow(config)),
    };
    writeln!(
        w,
        "{} {} ({}):",
        colorize_name(name, config),
        title,
        names.len()
    )?;
    print_name_lines(w, names, &arrow, known, config)
}

fn print_name_lines<W: Write>(
    w: &mut W,
    names: &[String],
    arrow: &str,
    known: &dyn Fn(&str) -> bool,
    config: &OutputConfig,
) -> io::Result<()> {
    if names.is_empty() {
        return writeln!(w, "  {}", dimmed("(none)", config));
    }
    for name in names {
        let marker = if known(name) {
            String::new()
        } else {
            format!(" {}", missing_marker(config))
        };
        writeln!(w, "  {} {}{}", arrow, colorize_name(name, config), marker)?;
    }
    Ok(())
}

fn print_warnings_text<W: Write>(
    w: &mut W,
    warnings: &[Warning],
    config: &OutputConfig,
) -> io::Result<()> {
    if warnings.is_empty() {
        writeln!(w, "{}", success("No warnings.", config))?;
        return Ok(());
    }

    writeln!(w, "Found {} warning(s):", warnings.len())?;
    writeln!(w)?;
    for item in warnings {
        writeln!(
            w,
            "  {} {}",
            colored_warning_icon(item.kind(), config),
            item.message()
        )?;
    }
    Ok(())
}

fn print_search_text<W: Write>(
    w: &mut W,
    result: &SearchResult,
    services: &[Service],
    config: &OutputConfig,
) -> io::Result<()> {
    if !result.is_active() {
        writeln!(w, "Empty query: nothing is filtered.")?;
        return Ok(());
    }

    writeln!(
        w,
        "{} matched, {} related",
        result.counts.matched, result.counts.related
    )?;
    if result.counts.matched == 0 {
        return Ok(());
    }

    let known: HashSet<&str> = services.iter().map(|s| s.name.as_str()).collect();

    writeln!(w)?;
    writeln!(w, "{}:", bold("Matched", config))?;
    for name in &result.matched {
        writeln!(w, "  {}", bold(&colorize_name(name, config), config))?;
    }

    if result.counts.related > 0 {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Related", config))?;
        for name in result.related() {
            let marker = if known.contains(name) {
                String::new()
            } else {
                format!(" {}", missing_marker(config))
            };
            writeln!(w, "  {}{}", colorize_name(name, config), marker)?;
        }
    }
    Ok(())
}
