//! # balcao-core: Pure Business Logic for Balcão POS
//!
//! This crate holds every rule the counter screens depend on, as pure
//! functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Balcão Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (forms, checkout)                  │   │
//! │  │    Client form ──► CPF/CNPJ field     Cart ──► Totals ──► Split │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    balcao-session (commands, state)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ balcao-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ document │ │  order   │ │  fiscal  │ │   mask   │          │   │
//! │  │   │ CPF/CNPJ │ │  totals  │ │ NCM/CEST │ │ CEP, R$  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`] - CPF/CNPJ check digits and masks
//! - [`order`] - Cart totals, discounts, payment split
//! - [`money`] - Integer-centavo Money type
//! - [`fiscal`] - NCM/CEST/CSOSN, NF-e recipient checks, cancellation window
//! - [`mask`] - Progressive input masks (CEP, NCM, CEST, money)
//! - [`types`] - Domain types
//! - [`validation`] - Field validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use balcao_core::{compute_totals, validate_individual_id, Discount, LineItem, Money};
//!
//! assert!(validate_individual_id("529.982.247-25"));
//!
//! let items = [LineItem::new(Money::from_cents(1000), 1)];
//! let totals = compute_totals(&items, Discount::percent(200)).unwrap();
//! assert!(totals.total.is_zero());
//! ```

pub mod document;
pub mod error;
pub mod fiscal;
pub mod mask;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{
    format_masked, validate_individual_id, validate_organization_id, TaxpayerId, TaxpayerKind,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fiscal::{can_cancel, CancelRefusal, FiscalDocument, FiscalIssue};
pub use money::Money;
pub use order::{compute_totals, split_equally};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart.
///
/// Guards against typing 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: i64 = 999;
