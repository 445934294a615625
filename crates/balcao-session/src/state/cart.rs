//! # Cart State
//!
//! Manages the current checkout cart and its discount.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several screens (cart list, discount box, payment split) touch it
//! 2. Only one command should modify the cart at a time
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Front end action         Command                 Cart State Change     │
//! │  ────────────────         ───────                 ─────────────────     │
//! │                                                                         │
//! │  Click Product ──────────► add_to_cart() ───────► items.push(item)     │
//! │  Change Quantity ────────► update_cart_item() ──► items[i].qty = n     │
//! │  Click Remove ───────────► remove_from_cart() ──► items.remove(i)      │
//! │  Edit Discount ──────────► set_discount() ──────► discount = d         │
//! │  Click Clear ────────────► clear_cart() ────────► items.clear()        │
//! │                                                                         │
//! │  Totals are recomputed from items + discount on every read.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use balcao_core::validation::{
    validate_cart_size, validate_discount_bps, validate_price_cents, validate_quantity,
};
use balcao_core::{
    compute_totals, CoreError, CoreResult, Discount, LineItem, Money, OrderTotals, Product,
    MAX_CART_ITEMS, MAX_ITEM_QUANTITY,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An item in the cart.
///
/// Name and price are frozen when the item is added, so a catalog edit
/// during checkout does not change what the customer was quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub unit: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit: product.unit.clone(),
            unit_price_cents: product.price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    #[inline]
    pub fn line_item(&self) -> LineItem {
        LineItem::new(Money::from_cents(self.unit_price_cents), self.quantity)
    }
}

/// The checkout cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product increases quantity)
/// - Quantity is 1..=999; setting it to 0 removes the item
/// - At most 100 distinct items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub discount: Discount,
    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            discount: Discount::NONE,
            created_at: Utc::now(),
        }
    }

    /// Adds a product or increases its quantity if already present.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        validate_price_cents(product.price_cents)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let new_qty = item.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        validate_cart_size(self.items.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.items.push(CartItem::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of an item; 0 removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(quantity)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product_id)
            .ok_or_else(|| CoreError::ProductNotInCart(product_id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == initial_len {
            Err(CoreError::ProductNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Replaces the order discount.
    ///
    /// The checkout input accepts 0-100% and non-negative amounts. An amount
    /// larger than the subtotal is allowed and clamps the total to zero.
    pub fn set_discount(&mut self, discount: Discount) -> CoreResult<()> {
        match discount {
            Discount::Value { amount } if amount.is_negative() => {
                return Err(CoreError::InvalidDiscount {
                    reason: format!("amount must not be negative, got {}", amount),
                });
            }
            Discount::Value { .. } => {}
            Discount::Percent { bps } => validate_discount_bps(bps)?,
        }
        self.discount = discount;
        Ok(())
    }

    /// Empties the cart and drops the discount.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = Discount::NONE;
        self.created_at = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::line_item).collect()
    }

    /// Subtotal, discount and total for the current contents.
    pub fn totals(&self) -> CoreResult<OrderTotals> {
        compute_totals(&self.line_items(), self.discount)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl CartTotals {
    pub fn from_cart(cart: &Cart) -> CoreResult<Self> {
        let totals = cart.totals()?;
        Ok(CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: totals.subtotal.cents(),
            discount_cents: totals.discount_amount.cents(),
            total_cents: totals.total.cents(),
        })
    }
}

/// Shared cart state.
///
/// ## Thread Safety
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one thread modifies the cart at a time
///
/// A poisoned lock is recovered: the cart holds plain data and every
/// mutation leaves it consistent before any fallible step.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Produto {}", id),
            category: "Lanches".to_string(),
            price_cents,
            unit: "UN".to_string(),
            ncm: Some("21069090".to_string()),
            cest: None,
            origem: Some("0".to_string()),
            tax_code: Some("102".to_string()),
            tax_needs_review: false,
            ncm_needs_review: false,
            is_active: true,
        }
    }

    #[test]
    fn test_cart_sample_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("x-burguer", 2500), 5).unwrap();
        cart.add_item(&test_product("refri", 600), 4).unwrap();

        let totals = CartTotals::from_cart(&cart).unwrap();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 9);
        assert_eq!(totals.subtotal_cents, 14900);
        assert_eq!(totals.discount_cents, 0);
        assert_eq!(totals.total_cents, 14900);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_cart_price_is_frozen() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 1000);
        cart.add_item(&product, 1).unwrap();

        product.price_cents = 5000;
        cart.add_item(&product, 1).unwrap();

        assert_eq!(cart.totals().unwrap().subtotal.cents(), 2000);
    }

    #[test]
    fn test_cart_quantity_limits() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        assert!(cart.add_item(&product, 0).is_err());
        cart.add_item(&product, 990).unwrap();
        assert_eq!(
            cart.add_item(&product, 10),
            Err(CoreError::QuantityTooLarge {
                requested: 1000,
                max: MAX_ITEM_QUANTITY
            })
        );
        assert!(cart.update_quantity("1", 1000).is_err());
        assert!(cart.update_quantity("1", -2).is_err());
    }

    #[test]
    fn test_cart_rejects_negative_price() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_item(&test_product("1", -10), 1),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_size_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(&test_product(&i.to_string(), 100), 1).unwrap();
        }
        assert_eq!(
            cart.add_item(&test_product("extra", 100), 1),
            Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS })
        );
        // Existing items can still grow
        assert!(cart.add_item(&test_product("0", 100), 1).is_ok());
    }

    #[test]
    fn test_update_and_remove() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 1).unwrap();

        cart.update_quantity("1", 7).unwrap();
        assert_eq!(cart.total_quantity(), 7);

        cart.update_quantity("1", 0).unwrap();
        assert!(cart.is_empty());

        assert_eq!(
            cart.remove_item("1"),
            Err(CoreError::ProductNotInCart("1".to_string()))
        );
        assert!(cart.update_quantity("missing", 2).is_err());
    }

    #[test]
    fn test_discount_rules() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1000), 1).unwrap();

        cart.set_discount(Discount::percent(10)).unwrap();
        assert_eq!(cart.totals().unwrap().total.cents(), 900);

        cart.set_discount(Discount::value(Money::from_cents(5000))).unwrap();
        assert!(cart.totals().unwrap().total.is_zero());

        assert!(cart.set_discount(Discount::percent(150)).is_err());
        assert!(cart
            .set_discount(Discount::value(Money::from_cents(-1)))
            .is_err());
        // Rejected discounts leave the previous one in place
        assert_eq!(cart.discount, Discount::value(Money::from_cents(5000)));
    }

    #[test]
    fn test_cart_clear_resets_discount() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 999), 2).unwrap();
        cart.set_discount(Discount::percent(5)).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.discount, Discount::NONE);
    }

    #[test]
    fn test_cart_state_shared_between_handles() {
        let state = CartState::new();
        let other = state.clone();

        other
            .with_cart_mut(|c| c.add_item(&test_product("1", 100), 2))
            .unwrap();
        assert_eq!(state.with_cart(|c| c.total_quantity()), 2);
    }
}
