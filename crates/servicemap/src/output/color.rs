//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success:        green   (completed actions)
//!   - Error/Cycle:    red     (cycle warnings, load errors)
//!   - Warning/Missing: yellow (missing references, dependents arrows)
//!   - Info/Reference: cyan    (service names, dependency arrows)
//!   - Muted:          dimmed  (field labels, connectors, non-matches)
//!   - Emphasis:       bold    (section headers, search matches)

use colored::Colorize;
use servicemap_graph::WarningKind;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Colorize a service name (cyan).
pub(crate) fn colorize_name(name: &str, config: &OutputConfig) -> String {
    info(name, config)
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Marker appended to names that do not resolve to a service.
pub(crate) fn missing_marker(config: &OutputConfig) -> String {
    warning("(missing)", config)
}

/// Icon for a warning kind, with ASCII fallback support.
pub(crate) fn warning_icon(kind: WarningKind, config: &OutputConfig) -> &'static str {
    match (kind, config.use_ascii) {
        (WarningKind::Cycle, true) => "@",
        (WarningKind::Cycle, false) => "⟳",
        (WarningKind::Missing, true) => "?",
        (WarningKind::Missing, false) => "⚠",
    }
}

/// Colored icon for a warning kind.
pub(crate) fn colored_warning_icon(kind: WarningKind, config: &OutputConfig) -> String {
    let icon = warning_icon(kind, config);
    match kind {
        WarningKind::Cycle => error(icon, config),
        WarningKind::Missing => warning(icon, config),
    }
}

/// Arrow for an outgoing (dependency) edge.
pub(crate) fn out_arrow(config: &OutputConfig) -> String {
    let arrow = if config.use_ascii { "->" } else { "→" };
    info(arrow, config)
}

/// Arrow for an incoming (dependent) edge.
pub(crate) fn in_arrow(config: &OutputConfig) -> String {
    let arrow = if config.use_ascii { "<-" } else { "←" };
    warning(arrow, config)
}
