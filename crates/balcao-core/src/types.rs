//! # Domain Types
//!
//! Core domain types used throughout Balcão POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    Discount     │   │   OrderTotals   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  unit_price     │   │  Value(amount)  │   │  subtotal       │       │
//! │  │  quantity       │   │  Percent(bps)   │   │  discount_amount│       │
//! │  └─────────────────┘   └─────────────────┘   │  total          │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Product      │   │  ClientProfile  │   TaxpayerKind / Id live    │
//! │  │  price, unit    │   │  kind, document │   in `document`             │
//! │  │  NCM/CEST/CSOSN │   │  IE, address    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::TaxpayerKind;
use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// A quantity of a priced entity.
///
/// ## Invariants
/// - `unit_price >= 0`
/// - `quantity >= 1`
///
/// The invariants are checked by
/// [`compute_totals`](crate::order::compute_totals), not at construction, so a
/// cart can carry whatever the user typed and still get a precise error back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub unit_price: Money,
    pub quantity: i64,
}

impl LineItem {
    #[inline]
    pub const fn new(unit_price: Money, quantity: i64) -> Self {
        LineItem {
            unit_price,
            quantity,
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Order-level discount chosen at checkout.
///
/// ## Wire Format
/// ```json
/// { "type": "value", "amount": 500 }
/// { "type": "percent", "bps": 1000 }
/// ```
///
/// Percentages are basis points: 1000 bps = 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum Discount {
    /// Fixed amount off the subtotal.
    Value { amount: Money },
    /// Percentage of the subtotal, in basis points.
    Percent { bps: u32 },
}

impl Discount {
    /// No discount.
    pub const NONE: Discount = Discount::Value {
        amount: Money::zero(),
    };

    #[inline]
    pub const fn value(amount: Money) -> Self {
        Discount::Value { amount }
    }

    #[inline]
    pub const fn percent_bps(bps: u32) -> Self {
        Discount::Percent { bps }
    }

    /// Whole-number percentage, e.g. `percent(10)` is 10%.
    #[inline]
    pub const fn percent(pct: u32) -> Self {
        Discount::Percent {
            bps: pct.saturating_mul(100),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::NONE
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Derived totals for a cart. Never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount_amount: Money,
    /// `max(0, subtotal - discount_amount)`
    pub total: Money,
}

/// One payer's portion of a split bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayerShare {
    /// 1-based payer number as shown on screen ("Pagador 1").
    pub payer: u32,
    pub amount: Money,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product with its fiscal classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Sale price in centavos.
    pub price_cents: i64,
    /// Sale unit (UN, KG, CX...). At most 6 characters.
    pub unit: String,
    /// 8-digit Mercosur classification, masked or not.
    pub ncm: Option<String>,
    /// 7-digit tax-substitution code; required when `tax_code` is an ST code.
    pub cest: Option<String>,
    /// Goods origin code, "0" through "8".
    pub origem: Option<String>,
    /// CSOSN or CST.
    pub tax_code: Option<String>,
    /// Set when an import or NCM change needs a human to confirm the taxation.
    pub tax_needs_review: bool,
    /// Set when the 8-digit NCM is not in the known NCM table.
    #[serde(default)]
    pub ncm_needs_review: bool,
    pub is_active: bool,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Client
// =============================================================================

/// State-registration (IE) indicator for the NF-e recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum IeIndicator {
    /// ICMS contributor; an IE number is mandatory.
    #[serde(rename = "1")]
    Contributor,
    /// Contributor exempt from registration.
    #[serde(rename = "2")]
    Exempt,
    /// Not a contributor.
    #[serde(rename = "3")]
    #[default]
    NonContributor,
    /// Recipient abroad.
    #[serde(rename = "9")]
    Foreign,
}

/// Postal address as captured by the client form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub cep: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    /// Two-letter state code, or `EX` for clients abroad.
    pub uf: String,
    pub complement: String,
    /// 7-digit IBGE municipality code.
    pub city_code: String,
}

impl Address {
    /// UF used to mark a foreign client.
    pub const FOREIGN_UF: &'static str = "EX";

    pub fn is_foreign(&self) -> bool {
        self.uf.trim().eq_ignore_ascii_case(Self::FOREIGN_UF)
    }
}

/// Client data as entered in the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientProfile {
    pub kind: TaxpayerKind,
    pub name: String,
    /// CPF or CNPJ, masked or not.
    pub document: String,
    pub phone: String,
    pub credit_limit: Option<Money>,
    pub ie_indicator: IeIndicator,
    pub ie: String,
    pub address: Address,
}
