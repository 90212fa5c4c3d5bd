//! petgraph-based adjacency index over a workflow's nodes and edges.
//!
//! Built once per validation call. Graph node weights are positions in the
//! node slice and edge weights are positions in the edge slice, so every
//! check can get back to the caller's data without string lookups.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{WorkflowEdge, WorkflowNode};

/// An edge endpoint that names no node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingEdge<'a> {
    pub edge: &'a WorkflowEdge,
    pub endpoint: Endpoint,
}

pub struct WorkflowGraph<'a> {
    nodes: &'a [WorkflowNode],
    edges: &'a [WorkflowEdge],
    pub graph: DiGraph<usize, usize>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
    /// Edges left out of the index because an endpoint is unknown.
    pub dangling: Vec<DanglingEdge<'a>>,
    /// Per node slot: positions of dangling edges leaving / entering it.
    loose_out: Vec<Vec<usize>>,
    loose_in: Vec<Vec<usize>>,
    /// Nodes whose id was already taken by an earlier node.
    pub duplicates: Vec<NodeIndex>,
}

impl<'a> WorkflowGraph<'a> {
    pub fn build(nodes: &'a [WorkflowNode], edges: &'a [WorkflowEdge]) -> Self {
        let mut graph: DiGraph<usize, usize> = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut node_indices: HashMap<&'a str, NodeIndex> = HashMap::with_capacity(nodes.len());
        let mut duplicates = Vec::new();
        let mut dangling = Vec::new();
        let mut loose_out = vec![Vec::new(); nodes.len()];
        let mut loose_in = vec![Vec::new(); nodes.len()];

        // Every node gets a graph slot, so NodeIndex::index() == slice position.
        for (pos, node) in nodes.iter().enumerate() {
            let idx = graph.add_node(pos);
            if node_indices.contains_key(node.id()) {
                duplicates.push(idx);
            } else {
                node_indices.insert(node.id(), idx);
            }
        }

        for (pos, edge) in edges.iter().enumerate() {
            let source = node_indices.get(edge.source.as_str()).copied();
            let target = node_indices.get(edge.target.as_str()).copied();

            if source.is_none() {
                dangling.push(DanglingEdge {
                    edge,
                    endpoint: Endpoint::Source,
                });
            }
            if target.is_none() {
                dangling.push(DanglingEdge {
                    edge,
                    endpoint: Endpoint::Target,
                });
            }
            // A dangling edge still counts toward the degree of its known end.
            match (source, target) {
                (Some(s), Some(t)) => {
                    graph.add_edge(s, t, pos);
                }
                (Some(s), None) => loose_out[s.index()].push(pos),
                (None, Some(t)) => loose_in[t.index()].push(pos),
                (None, None) => {}
            }
        }

        WorkflowGraph {
            nodes,
            edges,
            graph,
            node_indices,
            dangling,
            loose_out,
            loose_in,
            duplicates,
        }
    }

    pub fn nodes(&self) -> &'a [WorkflowNode] {
        self.nodes
    }

    /// All node slots, including duplicates, in input order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn node(&self, idx: NodeIndex) -> &'a WorkflowNode {
        let nodes = self.nodes;
        &nodes[self.graph[idx]]
    }

    pub fn index_of(&self, node_id: &str) -> Option<NodeIndex> {
        self.node_indices.get(node_id).copied()
    }

    /// Outgoing edges in input order, paired with their target. The target
    /// is `None` for an edge pointing at an unknown node.
    pub fn outgoing(&self, idx: NodeIndex) -> Vec<(&'a WorkflowEdge, Option<NodeIndex>)> {
        let mut out: Vec<(usize, Option<NodeIndex>)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), Some(e.target())))
            .chain(self.loose_out[idx.index()].iter().map(|&pos| (pos, None)))
            .collect();
        // petgraph walks adjacency lists newest-first.
        out.sort_by_key(|(pos, _)| *pos);
        let edges = self.edges;
        out.into_iter()
            .map(|(pos, target)| (&edges[pos], target))
            .collect()
    }

    pub fn outgoing_count(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.loose_out[idx.index()].len()
    }

    pub fn incoming_count(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
            + self.loose_in[idx.index()].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{EmptyConfig, NodeBase};

    fn task(id: &str) -> WorkflowNode {
        WorkflowNode::Task(NodeBase {
            id: id.into(),
            label: id.to_uppercase(),
            config: EmptyConfig::default(),
        })
    }

    fn edge(id: &str, source: &str, target: &str) -> WorkflowEdge {
        WorkflowEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            data: None,
        }
    }

    #[test]
    fn indexes_match_input_positions() {
        let nodes = vec![task("a"), task("b"), task("c")];
        let edges = vec![edge("e1", "a", "b"), edge("e2", "a", "c")];
        let graph = WorkflowGraph::build(&nodes, &edges);

        let a = graph.index_of("a").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(graph.node(a).id(), "a");
        assert_eq!(graph.outgoing_count(a), 2);
        assert_eq!(graph.incoming_count(graph.index_of("c").unwrap()), 1);

        let ids: Vec<&str> = graph.outgoing(a).iter().map(|(e, _)| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let nodes = vec![task("a"), task("b")];
        let edges = vec![edge("e1", "a", "b"), edge("e2", "a", "b")];
        let graph = WorkflowGraph::build(&nodes, &edges);
        assert_eq!(graph.outgoing_count(graph.index_of("a").unwrap()), 2);
    }

    #[test]
    fn records_dangling_endpoints() {
        let nodes = vec![task("a")];
        let edges = vec![edge("e1", "a", "ghost"), edge("e2", "x", "y")];
        let graph = WorkflowGraph::build(&nodes, &edges);

        assert_eq!(graph.graph.edge_count(), 0);
        assert_eq!(graph.dangling.len(), 3);
        assert_eq!(graph.dangling[0].endpoint, Endpoint::Target);
        assert_eq!(graph.dangling[1].edge.id, "e2");
    }

    #[test]
    fn dangling_edges_count_toward_known_endpoint() {
        let nodes = vec![task("a"), task("b")];
        let edges = vec![
            edge("e1", "a", "b"),
            edge("e2", "a", "ghost"),
            edge("e3", "ghost", "b"),
        ];
        let graph = WorkflowGraph::build(&nodes, &edges);
        let a = graph.index_of("a").unwrap();
        let b = graph.index_of("b").unwrap();

        assert_eq!(graph.outgoing_count(a), 2);
        assert_eq!(graph.incoming_count(b), 2);
        assert_eq!(graph.outgoing_count(b), 0);

        let out: Vec<(&str, Option<NodeIndex>)> = graph
            .outgoing(a)
            .iter()
            .map(|(e, t)| (e.id.as_str(), *t))
            .collect();
        assert_eq!(out, vec![("e1", Some(b)), ("e2", None)]);
    }

    #[test]
    fn first_node_wins_on_duplicate_id() {
        let nodes = vec![task("a"), task("a")];
        let graph = WorkflowGraph::build(&nodes, &[]);
        assert_eq!(graph.index_of("a").unwrap().index(), 0);
        assert_eq!(graph.duplicates.len(), 1);
        assert_eq!(graph.duplicates[0].index(), 1);
    }
}
