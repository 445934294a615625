//! # Cart Commands
//!
//! Commands for cart manipulation and the payment split.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Discount │────►│ Payment  │       │
//! │  │  Cart    │     │          │     │          │     │  split   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                   add_to_cart       set_discount    split_payment      │
//! │                   update_item                                          │
//! │                   remove_item                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use balcao_core::{split_equally, CoreResult, Discount, PayerShare, Product};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{Cart, CartItem, CartState, CartTotals};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub discount: Discount,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn from_cart(cart: &Cart) -> CoreResult<Self> {
        Ok(CartResponse {
            items: cart.items.clone(),
            discount: cart.discount,
            totals: CartTotals::from_cart(cart)?,
        })
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    Ok(cart.with_cart(CartResponse::from_cart)?)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new item
/// - Price is "frozen" at time of adding
///
/// ## Arguments
/// * `product` - Product picked on the counter screen
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    cart: &CartState,
    product: &Product,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product.id, quantity = %quantity, "add_to_cart command");

    if !product.is_active {
        return Err(ApiError::validation("Product is not available for sale"));
    }

    let response = cart.with_cart_mut(|c| {
        c.add_item(product, quantity)?;
        CartResponse::from_cart(c)
    })?;

    info!(
        product_id = %product.id,
        total_cents = response.totals.total_cents,
        "Item added to cart"
    );
    Ok(response)
}

/// Updates the quantity of an item in the cart.
///
/// ## Behavior
/// - Quantity 0: removes the item
/// - Quantity > max: returns error
pub fn update_cart_item(
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let response = cart.with_cart_mut(|c| {
        c.update_quantity(product_id, quantity)?;
        CartResponse::from_cart(c)
    })?;
    Ok(response)
}

/// Removes an item from the cart.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let response = cart.with_cart_mut(|c| {
        c.remove_item(product_id)?;
        CartResponse::from_cart(c)
    })?;
    Ok(response)
}

/// Replaces the order discount and returns the recomputed cart.
///
/// ## Wire format
/// ```json
/// { "type": "percent", "bps": 1000 }   // 10%
/// { "type": "value", "amount": 500 }   // R$ 5,00
/// ```
pub fn set_discount(cart: &CartState, discount: Discount) -> Result<CartResponse, ApiError> {
    debug!(?discount, "set_discount command");

    let response = cart.with_cart_mut(|c| {
        c.set_discount(discount)?;
        CartResponse::from_cart(c)
    })?;

    info!(
        discount_cents = response.totals.discount_cents,
        total_cents = response.totals.total_cents,
        "Discount applied"
    );
    Ok(response)
}

/// Clears all items and the discount.
pub fn clear_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    let response = cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from_cart(c)
    })?;
    info!("Cart cleared");
    Ok(response)
}

/// Splits the cart total equally among `payers`.
///
/// Leftover centavos go to the first payers, so the shares always add up
/// to the total.
pub fn split_payment(cart: &CartState, payers: usize) -> Result<Vec<PayerShare>, ApiError> {
    debug!(payers, "split_payment command");

    let total = cart.with_cart(|c| c.totals())?.total;
    Ok(split_equally(total, payers)?)
}
