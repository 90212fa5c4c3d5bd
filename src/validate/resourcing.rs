//! Role references against the caller's roster.
//!
//! A role id missing from the roster is not reported: the roster may be
//! partial or stale, and absence of data is not absence of users.

use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::parse::types::{RoleInfo, WorkflowNode};

pub fn validate_resourcing(
    nodes: &[WorkflowNode],
    roles: &[RoleInfo],
    diagnostics: &mut Diagnostics,
) {
    let roster: HashMap<&str, &RoleInfo> = roles.iter().map(|r| (r.id.as_str(), r)).collect();

    for node in nodes {
        validate_node_roles(node, &roster, diagnostics);
    }
}

pub(crate) fn validate_node_roles(
    node: &WorkflowNode,
    roster: &HashMap<&str, &RoleInfo>,
    diagnostics: &mut Diagnostics,
) {
    let (role_id, code, what) = match node {
        WorkflowNode::Role(n) => (
            n.config.role_id.as_deref(),
            DiagnosticCode::RoleNoUsers,
            "Role",
        ),
        WorkflowNode::Approval(n) => (
            n.config.approver_role_id.as_deref(),
            DiagnosticCode::ApprovalRoleNoUsers,
            "Approver role",
        ),
        WorkflowNode::Start(_)
        | WorkflowNode::End(_)
        | WorkflowNode::Task(_)
        | WorkflowNode::Conditional(_)
        | WorkflowNode::Sync(_) => return,
    };

    let Some(role) = role_id.and_then(|id| roster.get(id)) else {
        return;
    };

    if role.user_count == 0 {
        diagnostics.error(Diagnostic::at(
            code,
            format!(
                "{} '{}' assigned to node '{}' has no users",
                what,
                role.name,
                node.display_name()
            ),
            node,
        ));
    }
}
