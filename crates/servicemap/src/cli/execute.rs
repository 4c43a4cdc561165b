//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;
use serde::Serialize;
use servicemap_graph::{
    SearchResult, ServiceGraph, ServiceIndex, analyze_with, build_graph, dependencies_of,
    dependency_tree, dependents_of, search,
};
use std::path::{Path, PathBuf};

use super::args::{
    DependentsArgs, DepsArgs, GraphArgs, IndexArgs, InitArgs, SearchArgs, ShowArgs, TreeArgs,
    WarningsArgs,
};
use super::types::{GraphFormatArg, cycle_reporting, direction};
use crate::app::App;
use crate::config::Project;
use crate::error::Error;
use crate::output::{self, OutputMode, Relation};

/// Execute the init command
pub async fn execute_init(
    working_dir: &Path,
    args: &InitArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::commands::init;

    let quiet = args.quiet || output_mode == OutputMode::Json;
    if !quiet {
        println!("Initializing servicemap in {}...", working_dir.display());
    }

    let result = init::init(working_dir, args.services_dir.as_deref()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "config_file": result.config_file.display().to_string(),
            "services_dir": result.services_dir.display().to_string(),
            "services_dir_existed": result.services_dir_existed,
        }))?,
        OutputMode::Text if !args.quiet => {
            println!("  Config:   {}", result.config_file.display());
            println!(
                "  Services: {}{}",
                result.services_dir.display(),
                if result.services_dir_existed {
                    " (existing)"
                } else {
                    ""
                }
            );
        }
        OutputMode::Text => {}
    }

    Ok(())
}

/// Execute the list command
pub fn execute_list(app: &App, output_mode: OutputMode) -> Result<()> {
    output::print_services(app.services(), app.load_errors(), output_mode)?;
    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let service = app.service(&args.name)?;
    let dependents = dependents_of(&args.name, app.services());
    let index = ServiceIndex::build(app.services());

    output::print_service_details(
        service,
        &dependents,
        &|name: &str| index.contains(name),
        output_mode,
    )?;
    Ok(())
}

/// Execute the deps command
pub fn execute_deps(app: &App, args: &DepsArgs, output_mode: OutputMode) -> Result<()> {
    app.service(&args.name)?;
    let dependencies = dependencies_of(&args.name, app.services());
    let index = ServiceIndex::build(app.services());

    output::print_relations(
        &args.name,
        Relation::Dependencies,
        &dependencies,
        &|name: &str| index.contains(name),
        output_mode,
    )?;
    Ok(())
}

/// Execute the dependents command
pub fn execute_dependents(
    app: &App,
    args: &DependentsArgs,
    output_mode: OutputMode,
) -> Result<()> {
    app.service(&args.name)?;
    let dependents = dependents_of(&args.name, app.services());

    // Dependents are loaded services by construction.
    output::print_relations(
        &args.name,
        Relation::Dependents,
        &dependents,
        &|_: &str| true,
        output_mode,
    )?;
    Ok(())
}

/// Execute the tree command
pub fn execute_tree(app: &App, args: &TreeArgs, output_mode: OutputMode) -> Result<()> {
    let direction = direction(args.reverse);
    let root = dependency_tree(
        app.services(),
        &args.name,
        direction,
        args.depth.map(usize::from),
    )
    .ok_or_else(|| Error::ServiceNotFound(args.name.clone()))?;

    output::print_tree(&root, direction, output_mode)?;
    Ok(())
}

/// Execute the warnings command
pub fn execute_warnings(app: &App, args: &WarningsArgs, output_mode: OutputMode) -> Result<()> {
    let warnings = analyze_with(app.services(), cycle_reporting(args.per_cycle));
    output::print_warnings(&warnings, output_mode)?;

    if args.strict && !warnings.is_empty() {
        anyhow::bail!("{} warning(s) found", warnings.len());
    }
    Ok(())
}

/// Execute the search command
pub fn execute_search(app: &App, args: &SearchArgs, output_mode: OutputMode) -> Result<()> {
    let result = search(&args.query, app.services());
    output::print_search(&result, app.services(), output_mode)?;
    Ok(())
}

/// Render model plus the active search, as emitted by `graph --format json`.
#[derive(Serialize)]
struct GraphOutput<'a> {
    #[serde(flatten)]
    graph: &'a ServiceGraph,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a SearchResult>,
}

/// Execute the graph command
pub fn execute_graph(app: &App, args: &GraphArgs, output_mode: OutputMode) -> Result<()> {
    let graph = build_graph(app.services());
    let result = args
        .query
        .as_deref()
        .map(|query| search(query, app.services()));

    if output_mode == OutputMode::Json || args.format == GraphFormatArg::Json {
        output::print_json(&GraphOutput {
            graph: &graph,
            search: result.as_ref(),
        })?;
    } else {
        print!("{}", output::render_dot(&graph, result.as_ref()));
    }
    Ok(())
}

/// Execute the index command
///
/// Only lists file names, so definitions are not loaded or validated.
pub async fn execute_index(
    working_dir: &Path,
    args: &IndexArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let project = Project::discover(working_dir).await?;
    let input =
        resolve(working_dir, args.input.as_deref()).unwrap_or_else(|| project.services_dir());
    let output_file =
        resolve(working_dir, args.output.as_deref()).unwrap_or_else(|| project.index_file());

    let result = crate::index::generate_index(&input, &output_file).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&result)?,
        OutputMode::Text => output::print_message(&format!(
            "Indexed {} service file(s) into {}",
            result.index.services.len(),
            result.output_file.display()
        ))?,
    }
    Ok(())
}

/// Resolve a user-supplied path against the working directory.
fn resolve(working_dir: &Path, path: Option<&Path>) -> Option<PathBuf> {
    path.map(|p| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            working_dir.join(p)
        }
    })
}
