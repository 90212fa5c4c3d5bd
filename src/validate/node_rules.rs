//! Path completeness for branching nodes.
//! Approval rules are hard errors; conditional rules are heuristics and
//! only warn.

use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{WorkflowEdge, WorkflowNode};

pub fn validate_node_rules(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    for idx in graph.node_ids() {
        let node = graph.node(idx);
        match node {
            WorkflowNode::Approval(_) => {
                let edges: Vec<&WorkflowEdge> =
                    graph.outgoing(idx).into_iter().map(|(e, _)| e).collect();
                approval_paths(node, &edges, diagnostics);
            }
            WorkflowNode::Conditional(_) => {
                let edges: Vec<&WorkflowEdge> =
                    graph.outgoing(idx).into_iter().map(|(e, _)| e).collect();
                conditional_paths(node, &edges, diagnostics);
            }
            WorkflowNode::Start(_)
            | WorkflowNode::End(_)
            | WorkflowNode::Task(_)
            | WorkflowNode::Role(_)
            | WorkflowNode::Sync(_) => {}
        }
    }
}

fn approval_paths(
    node: &WorkflowNode,
    edges: &[&WorkflowEdge],
    diagnostics: &mut Diagnostics,
) {
    match edges.len() {
        0 => diagnostics.error(Diagnostic::at(
            DiagnosticCode::ApprovalNoEdges,
            format!("Approval node '{}' has no outgoing edges", node.display_name()),
            node,
        )),
        // A lone edge is the implicit approved path.
        1 => {}
        count => {
            if !edges.iter().any(|e| e.is_approval()) {
                diagnostics.error(Diagnostic::at(
                    DiagnosticCode::ApprovalNoApprovedPath,
                    format!(
                        "Approval node '{}' has {} outgoing edges but none is marked 'approved'",
                        node.display_name(),
                        count
                    ),
                    node,
                ));
            }
        }
    }
}

fn conditional_paths(
    node: &WorkflowNode,
    edges: &[&WorkflowEdge],
    diagnostics: &mut Diagnostics,
) {
    if edges.is_empty() {
        diagnostics.warning(Diagnostic::at(
            DiagnosticCode::ConditionalNoOutput,
            format!(
                "Conditional node '{}' has no outgoing edges",
                node.display_name()
            ),
            node,
        ));
        return;
    }

    let conditioned = edges.iter().filter(|e| e.is_conditioned()).count();
    let has_default = conditioned < edges.len();

    if conditioned == 0 {
        diagnostics.warning(Diagnostic::at(
            DiagnosticCode::ConditionalNoConditions,
            format!(
                "Conditional node '{}' has no conditioned edges; every path is a default",
                node.display_name()
            ),
            node,
        ));
    }
    if !has_default && conditioned < 2 {
        diagnostics.warning(Diagnostic::at(
            DiagnosticCode::ConditionalMissingDefault,
            format!(
                "Conditional node '{}' has no default path and may not cover every case",
                node.display_name()
            ),
            node,
        ));
    }
}
