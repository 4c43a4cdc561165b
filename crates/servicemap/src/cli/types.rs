//! CLI value enums and their conversions to engine types.

use clap::ValueEnum;
use servicemap_graph::{CycleReporting, Direction};

/// Output format for the `graph` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormatArg {
    /// Graphviz DOT
    Dot,
    /// The render model as JSON
    Json,
}

impl std::fmt::Display for GraphFormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dot => write!(f, "dot"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Tree direction from the `--reverse` flag.
pub fn direction(reverse: bool) -> Direction {
    if reverse {
        Direction::Dependents
    } else {
        Direction::Dependencies
    }
}

/// Cycle reporting mode from the `--per-cycle` flag.
pub fn cycle_reporting(per_cycle: bool) -> CycleReporting {
    if per_cycle {
        CycleReporting::PerComponent
    } else {
        CycleReporting::Merged
    }
}
