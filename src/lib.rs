pub mod diagnostic;
pub mod error;
pub mod parse;
pub mod validate;
pub mod wasm;

pub use diagnostic::{Diagnostic, DiagnosticCode, ValidationResult};
pub use error::WorkflowError;
pub use validate::{ValidateOptions, validate_json, validate_workflow};
