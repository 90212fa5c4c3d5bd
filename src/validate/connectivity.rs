//! Orphaned-node detection.
//!
//! Advisory only: a disconnected node does not stop the workflow from
//! running, but it is almost always an authoring slip.

use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::NodeKind;

pub fn validate_connectivity(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    for idx in graph.node_ids() {
        let node = graph.node(idx);
        let outgoing = graph.outgoing_count(idx);
        let incoming = graph.incoming_count(idx);

        let orphaned = match node.kind() {
            NodeKind::Start => outgoing == 0,
            NodeKind::End => incoming == 0,
            _ => outgoing == 0 && incoming == 0,
        };

        if orphaned {
            diagnostics.warning(Diagnostic::at(
                DiagnosticCode::OrphanedNode,
                format!(
                    "Node '{}' is not connected to the workflow",
                    node.display_name()
                ),
                node,
            ));
        }
    }
}
