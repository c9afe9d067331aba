use uuid::Uuid;
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub mod prompt_service;
pub mod tag_service;
pub mod template_engine;

/// Structural input validation, failing with the offending field named.
/// Runs before any storage access.
pub(crate) fn validate_input(input: &impl Validate) -> Result<()> {
    input.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);
        let detail = fields
            .first()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                format!("{}: {}", field, message)
            })
            .unwrap_or_else(|| "invalid input".to_string());
        AppError::Validation(detail)
    })
}

/// Identifiers are uuid-v4 strings; reject anything else before it
/// reaches a query.
pub(crate) fn ensure_uuid(field: &str, value: &str) -> Result<()> {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("{}: must be a valid uuid", field)))
}
