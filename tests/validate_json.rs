//! JSON in, `ValidationResult` out.

use workflow_validator::parse;
use workflow_validator::{DiagnosticCode, WorkflowError, validate_json};

#[test]
fn parse_expense_fixture() {
    let json = include_str!("fixtures/expense_approval.json");
    let workflow = parse::parse(json).expect("Should parse");

    assert_eq!(workflow.nodes.len(), 6);
    assert_eq!(workflow.edges.len(), 7);
    assert_eq!(workflow.nodes[2].kind(), parse::NodeKind::Role);
    assert!(workflow.edges[6].is_rejection());
}

#[test]
fn expense_fixture_is_valid_without_roster() {
    let json = include_str!("fixtures/expense_approval.json");
    let result = validate_json(json, None).expect("Should validate");

    assert!(result.is_valid(), "{:?}", result.errors());
    assert!(result.warnings().is_empty(), "{:?}", result.warnings());
}

#[test]
fn expense_fixture_with_unstaffed_approver() {
    let json = include_str!("fixtures/expense_approval.json");
    let roles = include_str!("fixtures/roles.json");
    let result = validate_json(json, Some(roles)).expect("Should validate");

    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 1);
    let err = &result.errors()[0];
    assert_eq!(err.code, DiagnosticCode::ApprovalRoleNoUsers);
    assert_eq!(err.node_id.as_deref(), Some("approve"));
    assert_eq!(err.node_label.as_deref(), Some("Manager approval"));
    assert!(err.message.contains("Manager"), "{}", err.message);
}

#[test]
fn malformed_workflow_json_is_an_error() {
    let err = validate_json("{ \"nodes\": [ { \"id\": 1 } ] }", None).unwrap_err();
    assert!(matches!(err, WorkflowError::Parse { what: "workflow", .. }));
    assert!(err.to_string().starts_with("Failed to parse workflow JSON"));
}

#[test]
fn unknown_node_kind_is_an_error() {
    let json = r#"{ "nodes": [ { "id": "x", "kind": "fork" } ], "edges": [] }"#;
    assert!(validate_json(json, None).is_err());
}

#[test]
fn malformed_roster_json_is_an_error() {
    let json = include_str!("fixtures/expense_approval.json");
    let err = validate_json(json, Some("[{ \"id\": \"r\" }]")).unwrap_err();
    assert!(matches!(err, WorkflowError::Parse { what: "role roster", .. }));
}

#[test]
fn roster_with_float_user_count() {
    let json = include_str!("fixtures/expense_approval.json");
    let roles = r#"[
        { "id": "finance", "name": "Finance", "userCount": 4.0 },
        { "id": "manager", "name": "Manager", "userCount": 0.0 }
    ]"#;
    let result = validate_json(json, Some(roles)).expect("Should validate");

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].code, DiagnosticCode::ApprovalRoleNoUsers);
}

#[test]
fn lone_task_result() {
    let json = r#"{
        "nodes": [ { "id": "t", "kind": "task", "label": "Draft" } ],
        "edges": []
    }"#;
    let result = validate_json(json, None).unwrap();
    insta::assert_json_snapshot!("lone_task_result", result);
}

#[test]
fn clean_result_shape() {
    let json = r#"{
        "nodes": [
            { "id": "s", "kind": "start" },
            { "id": "t", "kind": "task" },
            { "id": "e", "kind": "end" }
        ],
        "edges": [
            { "id": "e1", "source": "s", "target": "t" },
            { "id": "e2", "source": "t", "target": "e" }
        ]
    }"#;
    let result = validate_json(json, None).unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        serde_json::json!({ "valid": true, "errors": [], "warnings": [] })
    );
}
