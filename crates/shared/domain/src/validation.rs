//! Input validation helper.

use validator::Validate;

use crate::error::{DomainError, DomainResult};

/// Validate an input DTO, reporting the first failing field message.
pub fn validate_input<T: Validate>(input: &T) -> DomainResult<()> {
    input.validate().map_err(|e| {
        let message = e
            .field_errors()
            .into_iter()
            .next()
            .and_then(|(field, errors)| {
                errors.first().map(|error| match &error.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {}", field),
                })
            })
            .unwrap_or_else(|| "Validation failed".to_string());
        DomainError::validation(message)
    })
}
