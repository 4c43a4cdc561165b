//! Graphviz DOT rendering of the render model.
//!
//! Nodes on a cycle are drawn red, dangling targets get a dashed node of
//! their own, and when a search is active everything outside the highlighted
//! neighborhood is grayed out.

use servicemap_graph::{SearchResult, ServiceGraph};
use std::collections::BTreeSet;

const DIMMED_COLOR: &str = "gray80";
const CYCLE_COLOR: &str = "red";
const MISSING_COLOR: &str = "orange";

/// Render `graph` as a DOT digraph.
pub fn render_dot(graph: &ServiceGraph, search: Option<&SearchResult>) -> String {
    let dimmed = |name: &str| search.is_some_and(|result| result.is_dimmed(name));
    let matched = |name: &str| search.is_some_and(|result| result.is_match(name));

    let mut out = String::new();
    out.push_str("digraph services {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box, style=rounded, fontname=\"Helvetica\"];\n");

    for node in &graph.nodes {
        let mut attrs = Vec::new();
        let label = if node.owner.is_empty() {
            quote(&node.name)
        } else {
            format!("\"{}\\n{}\"", escape(&node.name), escape(&node.owner))
        };
        attrs.push(format!("label={label}"));

        if dimmed(&node.name) {
            attrs.push(format!("color={DIMMED_COLOR}"));
            attrs.push(format!("fontcolor={DIMMED_COLOR}"));
        } else if node.in_cycle {
            attrs.push(format!("color={CYCLE_COLOR}"));
        }
        if matched(&node.name) {
            attrs.push("penwidth=2".to_string());
        }

        out.push_str(&format!(
            "  {} [{}];\n",
            quote(&node.name),
            attrs.join(", ")
        ));
    }

    let missing: BTreeSet<&str> = graph
        .dangling_edges()
        .map(|edge| edge.target.as_str())
        .collect();
    for name in missing {
        let color = if dimmed(name) { DIMMED_COLOR } else { MISSING_COLOR };
        out.push_str(&format!(
            "  {} [style=\"rounded,dashed\", color={color}, fontcolor={color}];\n",
            quote(name)
        ));
    }

    for edge in &graph.edges {
        let mut attrs = Vec::new();
        if !edge.resolved {
            attrs.push("style=dashed".to_string());
        }
        if dimmed(&edge.source) || dimmed(&edge.target) {
            attrs.push(format!("color={DIMMED_COLOR}"));
        }

        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.join(", "))
        };
        out.push_str(&format!(
            "  {} -> {}{};\n",
            quote(&edge.source),
            quote(&edge.target),
            attrs
        ));
    }

    out.push_str("}\n");
    out
}

/// Quote a DOT identifier.
fn quote(id: &str) -> String {
    format!("\"{}\"", escape(id))
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
