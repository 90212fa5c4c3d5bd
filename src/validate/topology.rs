//! Single-pathway enforcement and cycle detection.
//!
//! Execution is strictly sequential per instance, so only branching kinds
//! may have more than one outgoing edge, and the only loops allowed are the
//! ones closed by a rejection edge.

use petgraph::graph::NodeIndex;
use tracing::trace;

use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::NodeKind;

pub fn validate_topology(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    single_pathway(graph, diagnostics);
    no_cycles(graph, diagnostics);
}

fn single_pathway(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    for idx in graph.node_ids() {
        let node = graph.node(idx);
        let kind = node.kind();
        if kind.is_branching() || kind == NodeKind::End {
            continue;
        }
        let count = graph.outgoing_count(idx);
        if count > 1 {
            diagnostics.error(Diagnostic::at(
                DiagnosticCode::ParallelNotAllowed,
                format!(
                    "Node '{}' has {} outgoing edges; parallel paths are not allowed \
                     (only approval and conditional nodes may branch)",
                    node.display_name(),
                    count
                ),
                node,
            ));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    next: usize,
}

fn no_cycles(graph: &WorkflowGraph, diagnostics: &mut Diagnostics) {
    let mut marks = vec![Mark::Unvisited; graph.graph.node_count()];

    // Every node is a root candidate so disconnected components are covered.
    for root in graph.node_ids() {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        let Some(cycle) = find_cycle(graph, root, &mut marks) else {
            continue;
        };

        let repeated = graph.node(cycle[0]);
        let rendered = cycle
            .iter()
            .map(|&idx| graph.node(idx).display_name())
            .collect::<Vec<_>>()
            .join(" → ");
        trace!(node_id = repeated.id(), cycle = %rendered, "cycle found");

        diagnostics.error(Diagnostic::at(
            DiagnosticCode::CycleDetected,
            format!("Cycle detected: {}", rendered),
            repeated,
        ));
    }
}

/// Non-rejection successors of `idx` that resolve to a node, in edge input
/// order.
fn forward_successors(graph: &WorkflowGraph, idx: NodeIndex) -> Vec<NodeIndex> {
    graph
        .outgoing(idx)
        .into_iter()
        .filter(|(edge, _)| !edge.is_rejection())
        .filter_map(|(_, target)| target)
        .collect()
}

/// Iterative DFS from `root`. Returns the first cycle met, starting and
/// ending on the repeated node.
fn find_cycle(
    graph: &WorkflowGraph,
    root: NodeIndex,
    marks: &mut [Mark],
) -> Option<Vec<NodeIndex>> {
    let mut frames = vec![Frame {
        node: root,
        successors: forward_successors(graph, root),
        next: 0,
    }];
    marks[root.index()] = Mark::OnStack;

    while let Some(frame) = frames.last_mut() {
        if frame.next == frame.successors.len() {
            marks[frame.node.index()] = Mark::Done;
            frames.pop();
            continue;
        }

        let target = frame.successors[frame.next];
        frame.next += 1;

        match marks[target.index()] {
            Mark::Done => {}
            Mark::Unvisited => {
                marks[target.index()] = Mark::OnStack;
                frames.push(Frame {
                    node: target,
                    successors: forward_successors(graph, target),
                    next: 0,
                });
            }
            Mark::OnStack => {
                let start = frames.iter().position(|f| f.node == target)?;
                let mut cycle: Vec<NodeIndex> = frames[start..].iter().map(|f| f.node).collect();
                cycle.push(target);
                // Abandoned frames are finished; a later root must not see them as live.
                for f in &frames {
                    marks[f.node.index()] = Mark::Done;
                }
                return Some(cycle);
            }
        }
    }

    None
}
