//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Balcão                                 │
//! │                                                                         │
//! │  Command Function  ──►  Result<T, ApiError>                             │
//! │         │                                                               │
//! │         ├── ValidationError ─────────────┐                              │
//! │         ├── CoreError::InvalidLineItem ──┼──► ApiError { code, message }│
//! │         └── CoreError::DuplicateDocument ┘                              │
//! │                                                                         │
//! │  Front end renders `message` inline and branches on `code`.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalid CPF/CNPJ keystrokes are not errors: `check_document` answers with
//! `valid: false`. `ApiError` is for actions the user must correct.

use balcao_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from session commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_LINE_ITEM",
///   "message": "Invalid line item at position 1: quantity must be at least 1, got 0"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Business rule or arithmetic limit hit
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// A line item broke the price/quantity invariant
    InvalidLineItem,

    /// The record already exists
    Duplicate,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidLineItem { .. } => {
                ApiError::new(ErrorCode::InvalidLineItem, err.to_string())
            }
            CoreError::InvalidDiscount { .. } | CoreError::InvalidPayerCount { .. } => {
                ApiError::validation(err.to_string())
            }
            CoreError::AmountOverflow { context } => {
                tracing::error!(context, "Amount overflow");
                ApiError::new(ErrorCode::BusinessLogic, "Amount is too large")
            }
            CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::ProductNotInCart(_) => ApiError::cart(err.to_string()),
            CoreError::DuplicateDocument(_) => ApiError::new(ErrorCode::Duplicate, err.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
