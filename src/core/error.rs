/// Failures raised by the fiscal engine.
///
/// Well-formed input never fails; these cover malformed schedules and input
/// values that would otherwise produce meaningless monetary figures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FiscalError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl FiscalError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FiscalError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
