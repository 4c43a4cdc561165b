//! Transitive dependency trees for drill-down views.
//!
//! The walk is breadth-first, so every reachable service appears exactly once,
//! at its shallowest depth, under the node that reached it first. Revisits
//! (including cycles) are cut off by the visited set.

use crate::domain::Service;
use crate::resolver::ServiceIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// Which edges a tree follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// From a service to what it depends on
    #[default]
    Dependencies,
    /// From a service to what depends on it
    Dependents,
}

/// A node in a dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Service name
    pub name: String,

    /// Distance from the root (the root is 0)
    pub depth: usize,

    /// True when the name does not resolve to a service
    pub missing: bool,

    /// Nodes discovered from this one
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Total number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Flat BFS record; `parent` indexes into the discovery list.
struct Discovered<'a> {
    name: &'a str,
    depth: usize,
    parent: Option<usize>,
    missing: bool,
}

/// Build the tree rooted at `root`.
///
/// Returns `None` if `root` is not in the collection. `max_depth` limits how
/// far from the root the walk goes; `Some(1)` yields direct neighbors only.
pub fn dependency_tree(
    services: &[Service],
    root: &str,
    direction: Direction,
    max_depth: Option<usize>,
) -> Option<TreeNode> {
    let index = ServiceIndex::build(services);
    let root = index.get(root)?.name.as_str();

    let reverse = match direction {
        Direction::Dependencies => None,
        Direction::Dependents => Some(reverse_edges(services)),
    };

    let mut found = vec![Discovered {
        name: root,
        depth: 0,
        parent: None,
        missing: false,
    }];
    let mut visited: HashSet<&str> = HashSet::from([root]);
    let mut queue: VecDeque<usize> = VecDeque::from([0]);

    while let Some(current) = queue.pop_front() {
        let (name, depth) = (found[current].name, found[current].depth);
        if found[current].missing || max_depth.is_some_and(|max| depth >= max) {
            continue;
        }

        let neighbors: Vec<&str> = match &reverse {
            None => index
                .get(name)
                .map(|service| service.dependencies.iter().map(String::as_str).collect())
                .unwrap_or_default(),
            Some(reverse) => reverse.get(name).cloned().unwrap_or_default(),
        };

        for next in neighbors {
            if visited.insert(next) {
                found.push(Discovered {
                    name: next,
                    depth: depth + 1,
                    parent: Some(current),
                    missing: !index.contains(next),
                });
                queue.push_back(found.len() - 1);
            }
        }
    }

    tracing::debug!(
        root,
        ?direction,
        nodes = found.len(),
        "Built dependency tree"
    );

    Some(assemble(&found))
}

/// Map each service name to the services depending on it, in collection order.
fn reverse_edges(services: &[Service]) -> HashMap<&str, Vec<&str>> {
    let mut reverse: HashMap<&str, Vec<&str>> = HashMap::new();
    for service in services {
        for dep in &service.dependencies {
            let dependents = reverse.entry(dep.as_str()).or_default();
            if !dependents.contains(&service.name.as_str()) {
                dependents.push(service.name.as_str());
            }
        }
    }
    reverse
}

/// Turn the flat discovery list into a nested tree.
///
/// BFS order puts every child after its parent, so attaching from the back
/// completes each node's children before the node itself is moved.
fn assemble(found: &[Discovered<'_>]) -> TreeNode {
    let mut nodes: Vec<TreeNode> = found
        .iter()
        .map(|d| TreeNode {
            name: d.name.to_string(),
            depth: d.depth,
            missing: d.missing,
            children: Vec::new(),
        })
        .collect();

    while nodes.len() > 1 {
        let at = nodes.len() - 1;
        let Some(mut node) = nodes.pop() else {
            break;
        };
        node.children.reverse();
        if let Some(parent) = found[at].parent {
            nodes[parent].children.push(node);
        }
    }

    let mut root = nodes.pop().unwrap_or_else(|| TreeNode {
        name: String::new(),
        depth: 0,
        missing: false,
        children: Vec::new(),
    });
    root.children.reverse();
    root
}
