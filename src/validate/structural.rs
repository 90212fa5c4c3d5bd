//! Node-cardinality and referential rules.

use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::parse::graph::{Endpoint, WorkflowGraph};
use crate::parse::types::{NodeKind, WorkflowNode};

/// Run all structural rules. Assumes at least one node.
pub fn validate_structural(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    exactly_one_start(graph, diagnostics);
    end_present(graph, diagnostics);
    no_sync_nodes(graph, diagnostics);
    unique_node_ids(graph, diagnostics);
    edges_reference_existing_nodes(graph, diagnostics);
}

fn exactly_one_start(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    let start_count = graph
        .nodes()
        .iter()
        .filter(|n| n.kind() == NodeKind::Start)
        .count();
    if start_count == 0 {
        diagnostics.error(Diagnostic::new(
            DiagnosticCode::NoStart,
            "Workflow must have exactly 1 start node, found 0",
        ));
    } else if start_count > 1 {
        diagnostics.error(Diagnostic::new(
            DiagnosticCode::MultipleStarts,
            format!(
                "Workflow must have exactly 1 start node, found {}",
                start_count
            ),
        ));
    }
}

fn end_present(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    if !graph.nodes().iter().any(|n| n.kind() == NodeKind::End) {
        diagnostics.warning(Diagnostic::new(
            DiagnosticCode::NoEnd,
            "Workflow has no end node and may not terminate",
        ));
    }
}

fn no_sync_nodes(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    for node in graph.nodes().iter().filter(|n| n.kind() == NodeKind::Sync) {
        diagnostics.error(sync_not_allowed(node));
    }
}

pub(crate) fn sync_not_allowed(node: &WorkflowNode) -> Diagnostic {
    Diagnostic::at(
        DiagnosticCode::SyncNotAllowed,
        format!(
            "Sync node '{}' is not allowed: parallel execution is disabled",
            node.display_name()
        ),
        node,
    )
}

fn unique_node_ids(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    for &idx in &graph.duplicates {
        let node = graph.node(idx);
        diagnostics.error(Diagnostic::at(
            DiagnosticCode::DuplicateNodeId,
            format!("Duplicate node id '{}'", node.id()),
            node,
        ));
    }
}

fn edges_reference_existing_nodes(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    for dangling in &graph.dangling {
        let (side, node_id) = match dangling.endpoint {
            Endpoint::Source => ("source", &dangling.edge.source),
            Endpoint::Target => ("target", &dangling.edge.target),
        };
        diagnostics.error(Diagnostic::new(
            DiagnosticCode::DanglingEdge,
            format!(
                "Edge '{}' references unknown {} node '{}'",
                dangling.edge.id, side, node_id
            ),
        ));
    }
}
