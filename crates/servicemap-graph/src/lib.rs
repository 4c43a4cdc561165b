//! Servicemap graph - dependency analysis for a catalog of services.
//!
//! The crate takes a collection of [`Service`] records, each naming the
//! services it depends on, and derives:
//!
//! - structural problems: dependency cycles and dangling references
//!   ([`analyze`], [`detect_cycles`], [`detect_missing_references`])
//! - point queries: [`dependencies_of`] and [`dependents_of`]
//! - drill-down: [`dependency_tree`] in either direction
//! - search highlighting: [`search`] expands text matches to their one-hop
//!   neighborhood
//! - a render model for drawing the graph: [`build_graph`]
//!
//! Every operation is a pure function over a borrowed slice. Nothing is
//! cached between calls and the input is never modified.
//!
//! # Example
//!
//! ```
//! use servicemap_graph::{analyze, dependents_of, Service, WarningKind};
//!
//! let services = vec![
//!     Service::new("api-gateway").with_dependencies(["user-service"]),
//!     Service::new("user-service").with_dependencies(["api-gateway", "ledger"]),
//! ];
//!
//! let warnings = analyze(&services);
//! assert_eq!(warnings.len(), 2);
//! assert_eq!(warnings[0].kind(), WarningKind::Cycle);
//! assert_eq!(warnings[1].kind(), WarningKind::Missing);
//!
//! assert_eq!(dependents_of("user-service", &services), vec!["api-gateway"]);
//! ```

#![forbid(unsafe_code)]

pub mod cycles;
pub mod domain;
pub mod missing;
pub mod query;
pub mod render;
pub mod resolver;
pub mod search;
pub mod tree;

pub use cycles::{CycleReporting, cycle_members, detect_cycles, detect_cycles_with};
pub use domain::{Edge, Service, Warning, WarningKind};
pub use missing::detect_missing_references;
pub use query::{dependencies_of, dependents_of};
pub use render::{GraphNode, ServiceGraph, build_graph};
pub use resolver::{Resolution, ServiceIndex};
pub use search::{SearchCounts, SearchResult, search};
pub use tree::{Direction, TreeNode, dependency_tree};

/// Run every structural check over a collection.
///
/// Cycle warnings come first, followed by missing-reference warnings in
/// collection order. An empty collection produces no warnings.
pub fn analyze(services: &[Service]) -> Vec<Warning> {
    analyze_with(services, CycleReporting::Merged)
}

/// Like [`analyze`], with an explicit cycle reporting mode.
pub fn analyze_with(services: &[Service], reporting: CycleReporting) -> Vec<Warning> {
    if services.is_empty() {
        return Vec::new();
    }

    let index = ServiceIndex::build(services);
    let mut warnings = cycles::detect_with_index(services, &index, reporting);
    warnings.extend(missing::detect_with_index(services, &index));

    tracing::debug!(
        services = services.len(),
        warnings = warnings.len(),
        "Analyzed service graph"
    );

    warnings
}
