use thiserror::Error;

/// The single error kind raised by the calculators and stores.
///
/// Every variant is a flavour of "invalid input"; callers report the message
/// and re-prompt. A failed operation never mutates a store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("unknown {kind} code {code}")]
    UnknownCode { kind: &'static str, code: i64 },
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("consumer id must not be empty")]
    EmptyId,
    #[error("consumer id '{0}' already has a bill")]
    DuplicateId(String),
}

/// Rejects negative and non-finite quantities.
pub(crate) fn check_quantity(field: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InvalidInput::Negative { field, value });
    }
    Ok(value)
}
