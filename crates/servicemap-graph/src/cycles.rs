//! Dependency cycle detection.
//!
//! The default detector is a depth-first sweep over every service in
//! collection order. It keeps four pieces of state:
//!
//! - `visited`: names already entered by any traversal
//! - `path`: the names on the current traversal path, plus a name -> position
//!   index so the cycle slice can be taken without scanning
//! - `stranded`: names that were still on the path when an earlier traversal
//!   stopped at a cycle. They are never popped, so they stay on the
//!   recursion stack for the rest of the sweep.
//! - an explicit frame stack in place of call recursion, so deep chains do not
//!   exhaust the thread stack
//!
//! When a dependency points back onto the current path, the path slice from
//! that dependency to the current node is a cycle. When it points at a
//! stranded name instead, the whole current path plus that name is taken.
//! Either way the members are merged into one cumulative set and the
//! traversal from the current root stops. All cycles found in the sweep are
//! reported together as a single [`Warning::Cycle`].
//!
//! Because stranded names depend on which roots ran first, the merged set can
//! change with collection order. It is stable for a fixed collection.
//!
//! [`CycleReporting::PerComponent`] reports each strongly connected component
//! that contains a cycle separately instead, using petgraph's Tarjan SCC.
//!
//! # Edge Direction
//!
//! Edges point from **dependent -> dependency**. Dependencies that do not
//! resolve to a service are ignored here; they are reported by
//! [`crate::missing`].

use crate::domain::{Service, Warning};
use crate::resolver::ServiceIndex;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::slice;

/// How detected cycles are grouped into warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CycleReporting {
    /// One warning carrying every service found on a cycle during the sweep
    #[default]
    Merged,

    /// One warning per strongly connected component that contains a cycle
    PerComponent,
}

/// Detect dependency cycles, merging all of them into at most one warning.
pub fn detect_cycles(services: &[Service]) -> Vec<Warning> {
    detect_cycles_with(services, CycleReporting::Merged)
}

/// Detect dependency cycles with an explicit reporting mode.
pub fn detect_cycles_with(services: &[Service], reporting: CycleReporting) -> Vec<Warning> {
    if services.is_empty() {
        return Vec::new();
    }
    let index = ServiceIndex::build(services);
    detect_with_index(services, &index, reporting)
}

/// The set of services the merged sweep flags as cycle participants.
pub fn cycle_members(services: &[Service]) -> BTreeSet<String> {
    let index = ServiceIndex::build(services);
    members_with_index(services, &index)
}

pub(crate) fn detect_with_index(
    services: &[Service],
    index: &ServiceIndex<'_>,
    reporting: CycleReporting,
) -> Vec<Warning> {
    match reporting {
        CycleReporting::Merged => {
            let members = members_with_index(services, index);
            if members.is_empty() {
                Vec::new()
            } else {
                tracing::debug!(members = members.len(), "Dependency cycle detected");
                vec![Warning::Cycle { members }]
            }
        }
        CycleReporting::PerComponent => cyclic_components(services, index)
            .into_iter()
            .map(|members| Warning::Cycle { members })
            .collect(),
    }
}

pub(crate) fn members_with_index(services: &[Service], index: &ServiceIndex<'_>) -> BTreeSet<String> {
    let mut sweep = Sweep::new(index);
    for service in services {
        if !sweep.visited.contains(service.name.as_str()) {
            sweep.run_from(service.name.as_str());
        }
    }
    sweep.members
}

/// One level of the explicit DFS stack.
struct Frame<'a> {
    name: &'a str,
    pending: slice::Iter<'a, String>,
}

/// Traversal state for the merged sweep.
struct Sweep<'i, 'a> {
    index: &'i ServiceIndex<'a>,
    visited: HashSet<&'a str>,
    path: Vec<&'a str>,
    position: HashMap<&'a str, usize>,
    stranded: HashSet<&'a str>,
    frames: Vec<Frame<'a>>,
    members: BTreeSet<String>,
}

impl<'i, 'a> Sweep<'i, 'a> {
    fn new(index: &'i ServiceIndex<'a>) -> Self {
        Self {
            index,
            visited: HashSet::new(),
            path: Vec::new(),
            position: HashMap::new(),
            stranded: HashSet::new(),
            frames: Vec::new(),
            members: BTreeSet::new(),
        }
    }

    fn enter(&mut self, name: &'a str) {
        self.visited.insert(name);
        self.position.insert(name, self.path.len());
        self.path.push(name);

        let pending = match self.index.get(name) {
            Some(service) => service.dependencies.iter(),
            None => slice::Iter::default(),
        };
        self.frames.push(Frame { name, pending });
    }

    fn leave(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.path.pop();
            self.position.remove(frame.name);
        }
    }

    /// Explore everything reachable from `root` until a cycle is found or the
    /// reachable subgraph is exhausted.
    fn run_from(&mut self, root: &'a str) {
        self.enter(root);

        while let Some(frame) = self.frames.last_mut() {
            let Some(dep) = frame.pending.next() else {
                self.leave();
                continue;
            };
            let current = frame.name;

            let Some(target) = self.index.get(dep) else {
                continue;
            };
            let target = target.name.as_str();

            if !self.visited.contains(target) {
                self.enter(target);
                continue;
            }

            if let Some(&start) = self.position.get(target) {
                self.record_cycle(start, target);
                tracing::trace!(root, from = current, to = target, "Back edge found");
                self.unwind();
                return;
            }

            if self.stranded.contains(target) {
                self.record_cycle(0, target);
                tracing::trace!(root, from = current, to = target, "Stranded node reached");
                self.unwind();
                return;
            }
            // Visited and off every stack: fully explored already.
        }
    }

    /// Merge `path[start..]` plus the back edge target into the member set.
    fn record_cycle(&mut self, start: usize, target: &str) {
        for name in &self.path[start..] {
            self.members.insert((*name).to_string());
        }
        self.members.insert(target.to_string());
    }

    /// Abandon the current traversal. Names still on the path are stranded.
    fn unwind(&mut self) {
        self.frames.clear();
        self.position.clear();
        self.stranded.extend(self.path.drain(..));
    }
}

/// Strongly connected components that contain a cycle, each as a name set.
///
/// Ordered by the collection position of each component's earliest member.
fn cyclic_components(services: &[Service], index: &ServiceIndex<'_>) -> Vec<BTreeSet<String>> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for service in services {
        let name = service.name.as_str();
        node_map
            .entry(name)
            .or_insert_with(|| graph.add_node(name));
    }

    // Only the winning record of a duplicated name contributes edges.
    for (&name, &node) in &node_map {
        let Some(service) = index.get(name) else {
            continue;
        };
        for dep in &service.dependencies {
            if let Some(&target) = node_map.get(dep.as_str()) {
                if !graph.contains_edge(node, target) {
                    graph.add_edge(node, target, ());
                }
            }
        }
    }

    let mut components: Vec<Vec<NodeIndex>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            nodes => nodes.len() > 1,
        })
        .collect();

    // Node indices follow first appearance in the collection.
    components.sort_by_key(|component| component.iter().min().copied());

    components
        .into_iter()
        .map(|component| {
            component
                .into_iter()
                .map(|node| graph[node].to_string())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_two_node_cycle() {
        let services = vec![
            Service::new("service-a").with_dependencies(["service-b"]),
            Service::new("service-b").with_dependencies(["service-a"]),
        ];

        let warnings = detect_cycles(&services);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            Warning::Cycle {
                members: set(&["service-a", "service-b"])
            }
        );
    }

    #[test]
    fn test_acyclic_chain() {
        let services = vec![
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["c"]),
            Service::new("c"),
        ];

        assert!(detect_cycles(&services).is_empty());
    }

    #[test]
    fn test_self_reference() {
        let services = vec![Service::new("self-ref").with_dependencies(["self-ref"])];

        assert_eq!(cycle_members(&services), set(&["self-ref"]));
    }

    #[test]
    fn test_three_node_cycle() {
        let services = vec![
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["c"]),
            Service::new("c").with_dependencies(["a"]),
        ];

        let warnings = detect_cycles(&services);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].services().len(), 3);
    }

    #[test]
    fn test_disjoint_cycles_are_merged() {
        let services = vec![
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
            Service::new("x").with_dependencies(["y"]),
            Service::new("y").with_dependencies(["z"]),
            Service::new("z").with_dependencies(["x"]),
        ];

        let warnings = detect_cycles(&services);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            Warning::Cycle {
                members: set(&["a", "b", "x", "y", "z"])
            }
        );
    }

    #[test]
    fn test_dangling_reference_is_not_a_cycle() {
        let services = vec![Service::new("service-a").with_dependencies(["non-existent"])];

        assert!(detect_cycles(&services).is_empty());
    }

    #[test]
    fn test_cycle_excludes_entry_path() {
        // root -> a -> b -> a: only a and b are on the cycle.
        let services = vec![
            Service::new("root").with_dependencies(["a"]),
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
        ];

        assert_eq!(cycle_members(&services), set(&["a", "b"]));
    }

    #[test]
    fn test_later_root_reaching_cycle_is_flagged() {
        // a and b stay stranded after the first root stops at the cycle.
        let services = vec![
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
            Service::new("c").with_dependencies(["a"]),
        ];

        assert_eq!(cycle_members(&services), set(&["a", "b", "c"]));
    }

    #[test]
    fn test_later_root_takes_whole_path() {
        let services = vec![
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
            Service::new("d").with_dependencies(["c"]),
            Service::new("c").with_dependencies(["a"]),
            Service::new("e"),
        ];

        assert_eq!(cycle_members(&services), set(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_entry_path_is_stranded() {
        // root -> a -> b -> a strands root as well, so a later root reaching
        // it is flagged even though root itself is not on a cycle.
        let services = vec![
            Service::new("root").with_dependencies(["a"]),
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
            Service::new("client").with_dependencies(["root"]),
        ];

        assert_eq!(cycle_members(&services), set(&["a", "b", "client", "root"]));
    }

    #[test]
    fn test_fully_explored_root_is_not_stranded() {
        let services = vec![
            Service::new("a").with_dependencies(["b"]),
            Service::new("b"),
            Service::new("c").with_dependencies(["a"]),
        ];

        assert!(cycle_members(&services).is_empty());
    }

    #[test]
    fn test_member_set_depends_on_root_order() {
        let services = vec![
            Service::new("c").with_dependencies(["a"]),
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
        ];

        assert_eq!(cycle_members(&services), set(&["a", "b"]));
        assert_eq!(cycle_members(&services), cycle_members(&services));
    }

    #[test]
    fn test_shared_dependency_is_not_a_cycle() {
        // Diamond: a -> {b, c}, b -> d, c -> d.
        let services = vec![
            Service::new("a").with_dependencies(["b", "c"]),
            Service::new("b").with_dependencies(["d"]),
            Service::new("c").with_dependencies(["d"]),
            Service::new("d"),
        ];

        assert!(detect_cycles(&services).is_empty());
    }

    #[test]
    fn test_duplicate_dependency_entries() {
        let services = vec![
            Service::new("a").with_dependencies(["b", "b"]),
            Service::new("b"),
        ];

        assert!(detect_cycles(&services).is_empty());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 50_000;
        let mut services: Vec<Service> = (0..depth)
            .map(|i| Service::new(format!("s{i}")).with_dependencies([format!("s{}", i + 1)]))
            .collect();
        services.push(Service::new(format!("s{depth}")).with_dependencies(["s0"]));

        assert_eq!(cycle_members(&services).len(), depth + 1);
    }

    #[test]
    fn test_per_component_reports_each_cycle() {
        let services = vec![
            Service::new("x").with_dependencies(["y"]),
            Service::new("y").with_dependencies(["x"]),
            Service::new("a").with_dependencies(["b"]),
            Service::new("b").with_dependencies(["a"]),
            Service::new("solo").with_dependencies(["solo"]),
            Service::new("leaf"),
        ];

        let warnings = detect_cycles_with(&services, CycleReporting::PerComponent);
        assert_eq!(
            warnings,
            vec![
                Warning::Cycle { members: set(&["x", "y"]) },
                Warning::Cycle { members: set(&["a", "b"]) },
                Warning::Cycle { members: set(&["solo"]) },
            ]
        );
    }

    #[test]
    fn test_per_component_acyclic() {
        let services = vec![
            Service::new("a").with_dependencies(["b", "ghost"]),
            Service::new("b"),
        ];

        assert!(detect_cycles_with(&services, CycleReporting::PerComponent).is_empty());
    }

    #[test]
    fn test_empty_collection() {
        assert!(detect_cycles(&[]).is_empty());
        assert!(cycle_members(&[]).is_empty());
    }
}
