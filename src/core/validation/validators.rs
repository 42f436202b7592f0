//! Product payload validation
//!
//! A payload is accepted only if it deserializes into [`ProductInput`] and
//! passes its `validator` rules: `name` must be a non-empty string and `price`
//! a JSON number. Optional fields must have the right type when present.

use crate::core::error::ValidationError;
use crate::core::product::ProductInput;
use serde_json::Value;
use validator::Validate;

/// Validate a raw JSON payload against the product write schema
pub fn validate_product(payload: Value) -> Result<ProductInput, ValidationError> {
    let input: ProductInput = serde_json::from_value(payload).map_err(|e| {
        tracing::debug!(error = %e, "product payload does not match schema");
        ValidationError::InvalidProduct
    })?;

    input.validate().map_err(|e| {
        tracing::debug!(error = %e, "product payload failed validation");
        ValidationError::InvalidProduct
    })?;

    Ok(input)
}
