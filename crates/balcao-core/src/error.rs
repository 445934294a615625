//! # Error Types
//!
//! Domain-specific error types for balcao-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  balcao-core errors (this file)                                        │
//! │  ├── CoreError        - Order math and cart rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  balcao-session errors (separate crate)                                │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keystroke-level document checks never produce errors: they return `false`.
//! Errors are reserved for invariant violations the caller must fix.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the order calculator and the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A line item breaks the `price >= 0, quantity >= 1` invariant.
    ///
    /// `index` is the zero-based position in the slice handed to
    /// [`compute_totals`](crate::order::compute_totals), so the checkout
    /// screen can highlight the offending row.
    #[error("Invalid line item at position {index}: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    /// An absolute discount was negative.
    #[error("Invalid discount: {reason}")]
    InvalidDiscount { reason: String },

    /// Money arithmetic exceeded the representable range.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: &'static str },

    /// A payment split was requested for zero payers.
    #[error("Payer count must be at least 1, got {count}")]
    InvalidPayerCount { count: usize },

    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// The product is not present in the cart.
    #[error("Product {0} not in cart")]
    ProductNotInCart(String),

    /// A client with the same CPF/CNPJ is already registered.
    #[error("A client with document {0} is already registered")]
    DuplicateDocument(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., wrong digit count, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// CPF/CNPJ failed the length or check-digit test.
    #[error("{kind} is invalid (check digit mismatch or wrong length)")]
    InvalidDocument { kind: &'static str },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidLineItem {
            index: 2,
            reason: "quantity must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid line item at position 2: quantity must be at least 1"
        );

        let err = CoreError::InvalidPayerCount { count: 0 };
        assert_eq!(err.to_string(), "Payer count must be at least 1, got 0");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidDocument { kind: "CPF" };
        assert_eq!(
            err.to_string(),
            "CPF is invalid (check digit mismatch or wrong length)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "ncm".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
