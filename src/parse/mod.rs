//! Parse phase: JSON → Rust types + adjacency index.

pub mod graph;
pub mod types;

pub use graph::WorkflowGraph;
pub use types::*;

use crate::error::WorkflowError;

/// Deserialize a workflow JSON string into a `Workflow`.
pub fn parse(json: &str) -> Result<Workflow, WorkflowError> {
    serde_json::from_str::<Workflow>(json).map_err(|source| WorkflowError::Parse {
        what: "workflow",
        source,
    })
}

/// Deserialize a role roster JSON array. `userCount` must be a
/// non-negative whole number; `2.0` is accepted, `2.5` is not.
pub fn parse_roles(json: &str) -> Result<Vec<RoleInfo>, WorkflowError> {
    serde_json::from_str::<Vec<RoleInfo>>(json).map_err(|source| WorkflowError::Parse {
        what: "role roster",
        source,
    })
}

/// Deserialize a single node, as sent by the editor's inspector.
pub fn parse_node(json: &str) -> Result<WorkflowNode, WorkflowError> {
    serde_json::from_str::<WorkflowNode>(json).map_err(|source| WorkflowError::Parse {
        what: "node",
        source,
    })
}
