use workflow_validator::DiagnosticCode;
use workflow_validator::ValidationResult;
use workflow_validator::parse::types::*;

// =============================================================================
// Node builders
// =============================================================================

fn base<C: Default>(id: &str) -> NodeBase<C> {
    NodeBase {
        id: id.into(),
        label: id.to_uppercase(),
        config: C::default(),
    }
}

pub fn start(id: &str) -> WorkflowNode {
    WorkflowNode::Start(base(id))
}

pub fn end(id: &str) -> WorkflowNode {
    WorkflowNode::End(base(id))
}

pub fn task(id: &str) -> WorkflowNode {
    WorkflowNode::Task(base(id))
}

pub fn conditional(id: &str) -> WorkflowNode {
    WorkflowNode::Conditional(base(id))
}

pub fn sync(id: &str) -> WorkflowNode {
    WorkflowNode::Sync(base(id))
}

pub fn approval(id: &str) -> WorkflowNode {
    WorkflowNode::Approval(base(id))
}

pub fn role(id: &str, role_id: Option<&str>) -> WorkflowNode {
    WorkflowNode::Role(NodeBase {
        config: RoleConfig {
            role_id: role_id.map(Into::into),
        },
        ..base::<RoleConfig>(id)
    })
}

pub fn approval_by(id: &str, approver_role_id: &str) -> WorkflowNode {
    WorkflowNode::Approval(NodeBase {
        config: ApprovalConfig {
            approver_role_id: Some(approver_role_id.into()),
        },
        ..base::<ApprovalConfig>(id)
    })
}

pub fn labeled(mut node: WorkflowNode, label: &str) -> WorkflowNode {
    match &mut node {
        WorkflowNode::Start(n) | WorkflowNode::End(n) | WorkflowNode::Task(n) => {
            n.label = label.into()
        }
        WorkflowNode::Conditional(n) | WorkflowNode::Sync(n) => n.label = label.into(),
        WorkflowNode::Role(n) => n.label = label.into(),
        WorkflowNode::Approval(n) => n.label = label.into(),
    }
    node
}

pub fn role_info(id: &str, name: &str, user_count: u32) -> RoleInfo {
    RoleInfo {
        id: id.into(),
        name: name.into(),
        user_count,
    }
}

// =============================================================================
// Edge builders
// =============================================================================

pub fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: format!("{}->{}", source, target),
        source: source.into(),
        target: target.into(),
        data: None,
    }
}

pub fn decided(source: &str, target: &str, decision: Decision) -> WorkflowEdge {
    WorkflowEdge {
        data: Some(EdgeData {
            decision: Some(decision),
            condition_value: None,
        }),
        ..edge(source, target)
    }
}

pub fn approved(source: &str, target: &str) -> WorkflowEdge {
    decided(source, target, Decision::Approved)
}

pub fn rejected(source: &str, target: &str) -> WorkflowEdge {
    decided(source, target, Decision::Rejected)
}

pub fn when(source: &str, target: &str, value: &str) -> WorkflowEdge {
    WorkflowEdge {
        data: Some(EdgeData {
            decision: None,
            condition_value: Some(value.into()),
        }),
        ..edge(source, target)
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn error_codes(result: &ValidationResult) -> Vec<DiagnosticCode> {
    result.errors().iter().map(|e| e.code).collect()
}

pub fn warning_codes(result: &ValidationResult) -> Vec<DiagnosticCode> {
    result.warnings().iter().map(|w| w.code).collect()
}

pub fn assert_has_error(result: &ValidationResult, code: DiagnosticCode) {
    assert!(
        result.has_error(code),
        "Expected error {}, got: {:?}",
        code,
        result.errors()
    );
}

pub fn assert_no_error(result: &ValidationResult, code: DiagnosticCode) {
    assert!(
        !result.has_error(code),
        "Did not expect error {}, but got: {:?}",
        code,
        result.errors()
    );
}

pub fn assert_has_warning(result: &ValidationResult, code: DiagnosticCode) {
    assert!(
        result.has_warning(code),
        "Expected warning {}, got: {:?}",
        code,
        result.warnings()
    );
}

pub fn assert_no_warning(result: &ValidationResult, code: DiagnosticCode) {
    assert!(
        !result.has_warning(code),
        "Did not expect warning {}, but got: {:?}",
        code,
        result.warnings()
    );
}
