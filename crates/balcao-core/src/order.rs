//! # Order Calculator
//!
//! Money totals for a cart of line items plus one discount, and the equal
//! split of a total among several payers.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items ──► check each (price ≥ 0, qty ≥ 1) ──► InvalidLineItem          │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  subtotal = Σ unit_price × quantity          (checked, in centavos)     │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  discount = amount            (Value)                                   │
//! │           | subtotal × bps / 10000, half up  (Percent)                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  total = max(0, subtotal − discount)         clamping is not an error   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Discount, LineItem, OrderTotals, PayerShare};

/// Computes subtotal, discount and total for `items`.
///
/// ## Errors
/// - [`CoreError::InvalidLineItem`] for a negative price or a quantity below 1
/// - [`CoreError::InvalidDiscount`] for a negative absolute discount
/// - [`CoreError::AmountOverflow`] if the subtotal does not fit in `i64` centavos
///
/// ## Example
/// ```rust
/// use balcao_core::money::Money;
/// use balcao_core::order::compute_totals;
/// use balcao_core::types::{Discount, LineItem};
///
/// let items = [
///     LineItem::new(Money::from_cents(2500), 5),
///     LineItem::new(Money::from_cents(600), 4),
/// ];
/// let totals = compute_totals(&items, Discount::NONE).unwrap();
/// assert_eq!(totals.subtotal.cents(), 14900);
/// assert_eq!(totals.total.cents(), 14900);
///
/// let clamped = compute_totals(&items, Discount::percent(200)).unwrap();
/// assert!(clamped.total.is_zero());
/// ```
pub fn compute_totals(items: &[LineItem], discount: Discount) -> CoreResult<OrderTotals> {
    let subtotal = subtotal(items)?;
    let discount_amount = discount_amount(subtotal, discount)?;
    let total = (subtotal - discount_amount).clamp_non_negative();

    Ok(OrderTotals {
        subtotal,
        discount_amount,
        total,
    })
}

/// Sums `unit_price × quantity` after checking each item's invariants.
pub fn subtotal(items: &[LineItem]) -> CoreResult<Money> {
    items
        .iter()
        .enumerate()
        .try_fold(Money::zero(), |acc, (index, item)| {
            let line = line_total(index, item)?;
            acc.checked_add(line).ok_or(CoreError::AmountOverflow {
                context: "subtotal",
            })
        })
}

fn line_total(index: usize, item: &LineItem) -> CoreResult<Money> {
    if item.unit_price.is_negative() {
        return Err(CoreError::InvalidLineItem {
            index,
            reason: format!("unit price must not be negative, got {}", item.unit_price),
        });
    }
    if item.quantity < 1 {
        return Err(CoreError::InvalidLineItem {
            index,
            reason: format!("quantity must be at least 1, got {}", item.quantity),
        });
    }

    item.unit_price
        .checked_mul_quantity(item.quantity)
        .ok_or(CoreError::AmountOverflow {
            context: "line total",
        })
}

/// Resolves `discount` against `subtotal`.
///
/// Percentages above 100% are accepted; the caller clamps the total.
pub fn discount_amount(subtotal: Money, discount: Discount) -> CoreResult<Money> {
    match discount {
        Discount::Value { amount } if amount.is_negative() => Err(CoreError::InvalidDiscount {
            reason: format!("amount must not be negative, got {}", amount),
        }),
        Discount::Value { amount } => Ok(amount),
        Discount::Percent { bps } => Ok(subtotal.percentage_of(bps)),
    }
}

/// Splits `total` equally among `payers`, in whole centavos.
///
/// Leftover centavos go one each to the first payers, so the shares always
/// add up to `total` exactly.
///
/// ```rust
/// use balcao_core::money::Money;
/// use balcao_core::order::split_equally;
///
/// let shares = split_equally(Money::from_cents(1000), 3).unwrap();
/// let cents: Vec<i64> = shares.iter().map(|s| s.amount.cents()).collect();
/// assert_eq!(cents, vec![334, 333, 333]);
/// ```
pub fn split_equally(total: Money, payers: usize) -> CoreResult<Vec<PayerShare>> {
    if payers == 0 {
        return Err(CoreError::InvalidPayerCount { count: payers });
    }
    let count = i64::try_from(payers).map_err(|_| CoreError::InvalidPayerCount { count: payers })?;
    let payer_numbers = u32::try_from(payers).map_err(|_| CoreError::InvalidPayerCount { count: payers })?;

    let base = total.cents() / count;
    let remainder = total.cents() % count;

    Ok((1..=payer_numbers)
        .map(|payer| {
            // remainder carries the sign of total, so negatives spread the same way
            let extra = if i64::from(payer) <= remainder.abs() {
                remainder.signum()
            } else {
                0
            };
            PayerShare {
                payer,
                amount: Money::from_cents(base + extra),
            }
        })
        .collect())
}
