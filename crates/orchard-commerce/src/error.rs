//! Commerce error types.

use thiserror::Error;

/// Errors that can occur while editing a combo or loading a catalog.
///
/// Facet building, filtering and pricing are total and
/// never produce these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Variant not found in the given product or catalog.
    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    /// Line item index out of range.
    #[error("Line item position {position} out of range (selection has {len} items)")]
    PositionOutOfRange { position: usize, len: usize },

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Discount tier definition rejected.
    #[error("Invalid discount tier: {0}")]
    InvalidDiscountTier(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
