//! Validation findings and the result returned to callers.

use serde::{Deserialize, Serialize};

use crate::parse::types::WorkflowNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Structural
    NoNodes,
    NoStart,
    MultipleStarts,
    NoEnd,
    SyncNotAllowed,
    DanglingEdge,
    DuplicateNodeId,
    // Connectivity
    OrphanedNode,
    // Topology
    ParallelNotAllowed,
    CycleDetected,
    // Node semantics
    ApprovalNoEdges,
    ApprovalNoApprovedPath,
    ConditionalNoOutput,
    ConditionalNoConditions,
    ConditionalMissingDefault,
    // Resourcing
    RoleNoUsers,
    ApprovalRoleNoUsers,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::NoNodes => "NO_NODES",
            DiagnosticCode::NoStart => "NO_START",
            DiagnosticCode::MultipleStarts => "MULTIPLE_STARTS",
            DiagnosticCode::NoEnd => "NO_END",
            DiagnosticCode::SyncNotAllowed => "SYNC_NOT_ALLOWED",
            DiagnosticCode::DanglingEdge => "DANGLING_EDGE",
            DiagnosticCode::DuplicateNodeId => "DUPLICATE_NODE_ID",
            DiagnosticCode::OrphanedNode => "ORPHANED_NODE",
            DiagnosticCode::ParallelNotAllowed => "PARALLEL_NOT_ALLOWED",
            DiagnosticCode::CycleDetected => "CYCLE_DETECTED",
            DiagnosticCode::ApprovalNoEdges => "APPROVAL_NO_EDGES",
            DiagnosticCode::ApprovalNoApprovedPath => "APPROVAL_NO_APPROVED_PATH",
            DiagnosticCode::ConditionalNoOutput => "CONDITIONAL_NO_OUTPUT",
            DiagnosticCode::ConditionalNoConditions => "CONDITIONAL_NO_CONDITIONS",
            DiagnosticCode::ConditionalMissingDefault => "CONDITIONAL_MISSING_DEFAULT",
            DiagnosticCode::RoleNoUsers => "ROLE_NO_USERS",
            DiagnosticCode::ApprovalRoleNoUsers => "APPROVAL_ROLE_NO_USERS",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_label: Option<String>,
}

pub type ValidationError = Diagnostic;
pub type ValidationWarning = Diagnostic;

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            node_id: None,
            node_label: None,
        }
    }

    /// Finding attributed to a node.
    pub fn at(code: DiagnosticCode, message: impl Into<String>, node: &WorkflowNode) -> Self {
        let label = node.label();
        Diagnostic {
            code,
            message: message.into(),
            node_id: Some(node.id().to_string()),
            node_label: (!label.is_empty()).then(|| label.to_string()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (node '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Accumulator each check pass pushes its findings into.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl Diagnostics {
    pub fn error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    pub fn into_result(self) -> ValidationResult {
        ValidationResult::new(self.errors, self.warnings)
    }
}

/// Outcome of validating one workflow template.
///
/// `valid` is derived from `errors` at construction and cannot be set on its
/// own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn new(errors: Vec<ValidationError>, warnings: Vec<ValidationWarning>) -> Self {
        ValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn has_error(&self, code: DiagnosticCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    pub fn has_warning(&self, code: DiagnosticCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
