//! Workflow template validation.
//!
//! Every pass reads the same immutable graph and pushes into one
//! `Diagnostics`; passes never look at each other's findings, so their order
//! only affects the order of the reported diagnostics.

pub mod connectivity;
pub mod node_rules;
pub mod resourcing;
pub mod structural;
pub mod topology;

use std::collections::HashMap;

use tracing::debug;

use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, ValidationResult};
use crate::error::WorkflowError;
use crate::parse::graph::WorkflowGraph;
use crate::parse::types::{NodeKind, RoleInfo, WorkflowEdge, WorkflowNode};

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Role roster with current user counts. The resourcing check is skipped
    /// when this is `None`.
    pub roles: Option<Vec<RoleInfo>>,
}

impl ValidateOptions {
    pub fn with_roles(roles: Vec<RoleInfo>) -> Self {
        ValidateOptions { roles: Some(roles) }
    }
}

/// Validate a workflow template. Never fails; every finding is reported in
/// the returned result.
pub fn validate_workflow(
    nodes: &[WorkflowNode],
    edges: &[WorkflowEdge],
    options: &ValidateOptions,
) -> ValidationResult {
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        roles = options.roles.as_ref().map(Vec::len),
        "validating workflow"
    );

    let mut diagnostics = Diagnostics::default();

    if nodes.is_empty() {
        diagnostics.error(Diagnostic::new(
            DiagnosticCode::NoNodes,
            "Workflow must contain at least one node",
        ));
        return diagnostics.into_result();
    }

    let graph = WorkflowGraph::build(nodes, edges);

    structural::validate_structural(&graph, &mut diagnostics);
    connectivity::validate_connectivity(&graph, &mut diagnostics);
    topology::validate_topology(&graph, &mut diagnostics);
    node_rules::validate_node_rules(&graph, &mut diagnostics);
    if let Some(roles) = &options.roles {
        resourcing::validate_resourcing(nodes, roles, &mut diagnostics);
    }

    let result = diagnostics.into_result();
    debug!(
        valid = result.is_valid(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "workflow validated"
    );
    result
}

/// Decode workflow (and optional roster) JSON, then validate.
pub fn validate_json(
    workflow_json: &str,
    roles_json: Option<&str>,
) -> Result<ValidationResult, WorkflowError> {
    let workflow = crate::parse::parse(workflow_json)?;
    let options = ValidateOptions {
        roles: roles_json.map(crate::parse::parse_roles).transpose()?,
    };
    Ok(validate_workflow(&workflow.nodes, &workflow.edges, &options))
}

/// Rules that apply to a node on its own, without edges: sync rejection and,
/// when a roster is given, role staffing.
pub fn validate_node(node: &WorkflowNode, options: &ValidateOptions) -> ValidationResult {
    let mut diagnostics = Diagnostics::default();

    if node.kind() == NodeKind::Sync {
        diagnostics.error(structural::sync_not_allowed(node));
    }

    if let Some(roles) = &options.roles {
        let roster: HashMap<&str, &RoleInfo> = roles.iter().map(|r| (r.id.as_str(), r)).collect();
        resourcing::validate_node_roles(node, &roster, &mut diagnostics);
    }

    diagnostics.into_result()
}
