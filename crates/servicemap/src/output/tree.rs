//! Dependency tree rendering for `servicemap tree` output.

use std::io::{self, Write};

use colored::Colorize;
use servicemap_graph::{Direction, TreeNode};

use super::color::{bold, colorize_name, missing_marker};
use super::{OutputConfig, OutputMode, write_json};

/// Print a dependency tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ api-gateway (dependencies)
/// ├── user-service
/// │   └── database
/// └── order-service
///     └── payments (missing)
/// ```
pub fn print_tree(root: &TreeNode, direction: Direction, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => print_tree_text(&mut handle, root, direction, &config),
        OutputMode::Json => write_json(
            &mut handle,
            &serde_json::json!({
                "direction": direction_label(direction),
                "tree": root,
            }),
        ),
    }
}

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::Dependencies => "dependencies",
        Direction::Dependents => "dependents",
    }
}

/// Render the tree with connectors.
pub(crate) fn print_tree_text<W: Write>(
    w: &mut W,
    root: &TreeNode,
    direction: Direction,
    config: &OutputConfig,
) -> io::Result<()> {
    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon_str = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };

    writeln!(
        w,
        "{} {} ({})",
        root_icon_str,
        bold(&root.name, config),
        direction_label(direction)
    )?;

    if root.children.is_empty() {
        let none = match direction {
            Direction::Dependencies => "  (no dependencies)",
            Direction::Dependents => "  (no dependents)",
        };
        return writeln!(w, "{none}");
    }

    print_children(w, &root.children, config)
}

/// Render the children of a node.
///
/// Walks with an explicit stack so deep chains cannot overflow. Each stack
/// entry carries the continuation flags of its ancestors, which decide
/// whether a `│` is drawn at that level.
fn print_children<W: Write>(
    w: &mut W,
    children: &[TreeNode],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };
    let muted = |segment: &str| {
        if config.use_colors {
            segment.dimmed().to_string()
        } else {
            segment.to_string()
        }
    };

    let mut stack: Vec<(&TreeNode, Vec<bool>, bool)> = children
        .iter()
        .enumerate()
        .rev()
        .map(|(i, child)| (child, Vec::new(), i == children.len() - 1))
        .collect();

    while let Some((node, segments, is_last)) = stack.pop() {
        let mut prefix = String::new();
        for &has_more in &segments {
            prefix.push_str(&muted(if has_more { pipe } else { space }));
        }
        let connector = muted(if is_last { corner } else { branch });

        let marker = if node.missing {
            format!(" {}", missing_marker(config))
        } else {
            String::new()
        };
        writeln!(
            w,
            "{}{}{}{}",
            prefix,
            connector,
            colorize_name(&node.name, config),
            marker
        )?;

        let mut next_segments = segments;
        next_segments.push(!is_last);
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate().rev() {
            stack.push((child, next_segments.clone(), i == count - 1));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, depth: usize, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            name: name.to_string(),
            depth,
            missing: false,
            children,
        }
    }

    fn sample() -> TreeNode {
        let mut payments = node("payments", 2, vec![]);
        payments.missing = true;
        node(
            "api-gateway",
            0,
            vec![
                node("user-service", 1, vec![node("database", 2, vec![])]),
                node("order-service", 1, vec![payments]),
            ],
        )
    }

    fn render(root: &TreeNode, config: &OutputConfig) -> String {
        let mut buffer = Vec::new();
        print_tree_text(&mut buffer, root, Direction::Dependencies, config).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_unicode_tree() {
        let output = render(&sample(), &OutputConfig::new(80, false, false));

        assert_eq!(
            output,
            "\
◆ api-gateway (dependencies)
├── user-service
│   └── database
└── order-service
    └── payments (missing)
"
        );
    }

    #[test]
    fn test_ascii_tree() {
        let output = render(&sample(), &OutputConfig::new(80, true, false));

        assert!(output.starts_with("* api-gateway"));
        assert!(output.contains("|-- user-service"));
        assert!(output.contains("|   `-- database"));
        assert!(output.contains("`-- order-service"));
    }

    #[test]
    fn test_leaf_root() {
        let mut buffer = Vec::new();
        let root = node("database", 0, vec![]);
        print_tree_text(
            &mut buffer,
            &root,
            Direction::Dependents,
            &OutputConfig::new(80, false, false),
        )
        .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("(no dependents)"));
    }
}
