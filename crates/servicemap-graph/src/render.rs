//! Render model: the snapshot a drawing surface consumes.

use crate::cycles;
use crate::domain::{Edge, Service, Warning};
use crate::missing;
use crate::resolver::ServiceIndex;
use serde::Serialize;

/// A node to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Service name
    pub name: String,

    /// Owning team, shown as a node label
    pub owner: String,

    /// Whether the merged cycle sweep flagged this service
    pub in_cycle: bool,
}

/// Nodes, edges, and warnings for one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceGraph {
    /// One node per record, in collection order
    pub nodes: Vec<GraphNode>,

    /// One edge per declared dependency entry
    pub edges: Vec<Edge>,

    /// Cycle warnings followed by missing-reference warnings
    pub warnings: Vec<Warning>,
}

impl ServiceGraph {
    /// Edges whose target is not a known service.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|edge| !edge.resolved)
    }
}

/// Build the render model for `services`.
pub fn build_graph(services: &[Service]) -> ServiceGraph {
    let index = ServiceIndex::build(services);
    let members = cycles::members_with_index(services, &index);

    let nodes = services
        .iter()
        .map(|service| GraphNode {
            name: service.name.clone(),
            owner: service.owner.clone(),
            in_cycle: members.contains(&service.name),
        })
        .collect();

    let mut edges = Vec::new();
    for service in services {
        for dep in &service.dependencies {
            edges.push(Edge::new(
                service.name.as_str(),
                dep.as_str(),
                index.contains(dep),
            ));
        }
    }

    let mut warnings = Vec::new();
    if !members.is_empty() {
        warnings.push(Warning::Cycle { members });
    }
    warnings.extend(missing::detect_with_index(services, &index));

    ServiceGraph {
        nodes,
        edges,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WarningKind;

    #[test]
    fn test_empty_collection() {
        assert_eq!(build_graph(&[]), ServiceGraph::default());
    }

    #[test]
    fn test_nodes_and_edges() {
        let services = vec![
            Service::new("a").with_owner("team-a").with_dependencies(["b", "ghost"]),
            Service::new("b").with_dependencies(["a"]),
            Service::new("c"),
        ];

        let graph = build_graph(&services);

        let flags: Vec<(&str, bool)> = graph
            .nodes
            .iter()
            .map(|n| (n.name.as_str(), n.in_cycle))
            .collect();
        assert_eq!(flags, vec![("a", true), ("b", true), ("c", false)]);
        assert_eq!(graph.nodes[0].owner, "team-a");

        let ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a->b", "a->ghost", "b->a"]);
        assert_eq!(
            graph.dangling_edges().map(|e| e.target.as_str()).collect::<Vec<_>>(),
            vec!["ghost"]
        );

        let kinds: Vec<WarningKind> = graph.warnings.iter().map(Warning::kind).collect();
        assert_eq!(kinds, vec![WarningKind::Cycle, WarningKind::Missing]);
    }

    #[test]
    fn test_duplicate_dependency_yields_two_edges() {
        let services = vec![
            Service::new("a").with_dependencies(["b", "b"]),
            Service::new("b"),
        ];

        assert_eq!(build_graph(&services).edges.len(), 2);
    }
}
