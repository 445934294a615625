//! # Validation Module
//!
//! Field validators shared by the cart, the client registry and the product
//! form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Keystroke (document::validate_*, mask::*)                     │
//! │  ├── Runs on every change, returns bool / masked text                  │
//! │  └── Never fails                                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Save / command (THIS MODULE)                                  │
//! │  ├── Typed ValidationError per field                                   │
//! │  └── Rendered inline next to the field                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use balcao_core::validation::{validate_quantity, validate_unit};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_unit("KG").is_ok());
//! assert!(validate_unit("UNIDADE").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::BPS_SCALE;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest sale unit accepted on a fiscal document.
pub const MAX_UNIT_LEN: usize = 6;

pub const MAX_CLIENT_NAME_LEN: usize = 120;
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn required_with_max(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a client name / razão social.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    required_with_max("name", name, MAX_CLIENT_NAME_LEN)
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required_with_max("name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a sale unit (UN, KG, CX...).
///
/// ## Rules
/// - Must not be blank
/// - At most 6 characters after trimming
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    required_with_max("unit", unit, MAX_UNIT_LEN)
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (courtesy items)
///
/// ```rust
/// use balcao_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a checkout percentage discount in basis points.
///
/// ## Rules
/// - Between 0 and 10000 (0% to 100%)
///
/// The order calculator itself accepts larger values and clamps the total;
/// this check is for the discount input on the checkout screen.
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if i128::from(bps) > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: BPS_SCALE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct item fits in the cart.
///
/// ## Rules
/// - `current_items` must be below MAX_CART_ITEMS (100)
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ```rust
/// use balcao_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}
