//! WASM entry points for the browser editor.

use wasm_bindgen::prelude::*;

use crate::diagnostic::ValidationResult;
use crate::error::WorkflowError;
use crate::validate::{self, ValidateOptions};

/// Validate a workflow JSON `{ nodes, edges }` against an optional role
/// roster JSON array. Returns a `ValidationResult`-shaped object.
#[wasm_bindgen]
pub fn validate_workflow(workflow_json: &str, roles_json: Option<String>) -> JsValue {
    let result = validate_workflow_inner(workflow_json, roles_json.as_deref());
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(workflow_json: &str, roles_json: Option<&str>) -> ResultDto {
    match validate::validate_json(workflow_json, roles_json) {
        Ok(result) => ResultDto::from(result),
        Err(e) => ResultDto::from(e),
    }
}

/// Validate a single node JSON (inspector panel). Returns a
/// `ValidationResult`-shaped object.
#[wasm_bindgen]
pub fn validate_node(node_json: &str, roles_json: Option<String>) -> JsValue {
    let result = validate_node_inner(node_json, roles_json.as_deref());
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_node_inner(node_json: &str, roles_json: Option<&str>) -> ResultDto {
    let node = match crate::parse::parse_node(node_json) {
        Ok(n) => n,
        Err(e) => return ResultDto::from(e),
    };
    let roles = match roles_json.map(crate::parse::parse_roles).transpose() {
        Ok(r) => r,
        Err(e) => return ResultDto::from(e),
    };
    ResultDto::from(validate::validate_node(&node, &ValidateOptions { roles }))
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosticDto {
    code: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_label: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ResultDto {
    valid: bool,
    errors: Vec<DiagnosticDto>,
    warnings: Vec<DiagnosticDto>,
}

fn to_dtos(diagnostics: &[crate::diagnostic::Diagnostic]) -> Vec<DiagnosticDto> {
    diagnostics
        .iter()
        .map(|d| DiagnosticDto {
            code: d.code.as_str().to_string(),
            message: d.message.clone(),
            node_id: d.node_id.clone(),
            node_label: d.node_label.clone(),
        })
        .collect()
}

impl From<ValidationResult> for ResultDto {
    fn from(result: ValidationResult) -> Self {
        ResultDto {
            valid: result.is_valid(),
            errors: to_dtos(result.errors()),
            warnings: to_dtos(result.warnings()),
        }
    }
}

impl From<WorkflowError> for ResultDto {
    fn from(e: WorkflowError) -> Self {
        ResultDto {
            valid: false,
            errors: vec![DiagnosticDto {
                code: e.code().to_string(),
                message: e.to_string(),
                node_id: None,
                node_label: None,
            }],
            warnings: vec![],
        }
    }
}
