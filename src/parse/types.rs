//! Rust types for the workflow template JSON sent by the editor.
//!
//! Nodes are a tagged union on `kind`; each variant carries the config shape
//! for that kind. Only role and approval nodes have config the validator
//! reads, every other kind deserializes its config as `EmptyConfig`.

use serde::{Deserialize, Serialize};

// =============================================================================
// TOP-LEVEL WORKFLOW
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        }
    }
}

impl WorkflowEdge {
    fn decision(&self) -> Option<Decision> {
        self.data.as_ref().and_then(|d| d.decision)
    }

    /// Condition value, with an empty string treated as unset.
    pub fn condition_value(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.condition_value.as_deref())
            .filter(|v| !v.is_empty())
    }

    fn is_marked(&self, decision: Decision) -> bool {
        self.decision() == Some(decision) || self.condition_value() == Some(decision.as_str())
    }

    /// A rejection back-edge: the only edge allowed to close a loop.
    pub fn is_rejection(&self) -> bool {
        self.is_marked(Decision::Rejected)
    }

    pub fn is_approval(&self) -> bool {
        self.is_marked(Decision::Approved)
    }

    /// True when the edge carries a decision or a condition value.
    pub fn is_conditioned(&self) -> bool {
        self.decision().is_some() || self.condition_value().is_some()
    }
}

// =============================================================================
// ROLE ROSTER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "whole_count")]
    pub user_count: u32,
}

/// Accepts `3` as well as `3.0`; JS callers do not distinguish the two.
fn whole_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let n = f64::deserialize(deserializer)?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Ok(n as u32)
    } else {
        Err(serde::de::Error::custom(format!(
            "userCount must be a non-negative whole number, got {}",
            n
        )))
    }
}

// =============================================================================
// NODE CONFIGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyConfig {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_role_id: Option<String>,
}

// =============================================================================
// WORKFLOW NODE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBase<C> {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub config: C,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WorkflowNode {
    Start(NodeBase<EmptyConfig>),
    End(NodeBase<EmptyConfig>),
    Task(NodeBase<EmptyConfig>),
    Role(NodeBase<RoleConfig>),
    Approval(NodeBase<ApprovalConfig>),
    Conditional(NodeBase<EmptyConfig>),
    /// Legacy parallel-join node. Deserializes so it can be rejected.
    Sync(NodeBase<EmptyConfig>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Start,
    End,
    Task,
    Role,
    Approval,
    Conditional,
    Sync,
}

impl NodeKind {
    /// Kinds that may choose between several outgoing edges.
    pub fn is_branching(&self) -> bool {
        matches!(self, NodeKind::Approval | NodeKind::Conditional)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Task => "task",
            NodeKind::Role => "role",
            NodeKind::Approval => "approval",
            NodeKind::Conditional => "conditional",
            NodeKind::Sync => "sync",
        };
        f.write_str(name)
    }
}

impl WorkflowNode {
    pub fn id(&self) -> &str {
        match self {
            WorkflowNode::Start(n) => &n.id,
            WorkflowNode::End(n) => &n.id,
            WorkflowNode::Task(n) => &n.id,
            WorkflowNode::Role(n) => &n.id,
            WorkflowNode::Approval(n) => &n.id,
            WorkflowNode::Conditional(n) => &n.id,
            WorkflowNode::Sync(n) => &n.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WorkflowNode::Start(n) => &n.label,
            WorkflowNode::End(n) => &n.label,
            WorkflowNode::Task(n) => &n.label,
            WorkflowNode::Role(n) => &n.label,
            WorkflowNode::Approval(n) => &n.label,
            WorkflowNode::Conditional(n) => &n.label,
            WorkflowNode::Sync(n) => &n.label,
        }
    }

    /// Label for diagnostics; falls back to the id for unlabeled nodes.
    pub fn display_name(&self) -> &str {
        let label = self.label();
        if label.is_empty() { self.id() } else { label }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            WorkflowNode::Start(_) => NodeKind::Start,
            WorkflowNode::End(_) => NodeKind::End,
            WorkflowNode::Task(_) => NodeKind::Task,
            WorkflowNode::Role(_) => NodeKind::Role,
            WorkflowNode::Approval(_) => NodeKind::Approval,
            WorkflowNode::Conditional(_) => NodeKind::Conditional,
            WorkflowNode::Sync(_) => NodeKind::Sync,
        }
    }
}
