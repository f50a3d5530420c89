//! # Cart Module
//!
//! Pure in-memory shopping cart that feeds the pricing engine.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Frontend Action          Cart Method             State Change          │
//! │  ───────────────          ───────────             ────────────          │
//! │                                                                         │
//! │  Click "Add to Cart" ────► add_item() ──────────► merge or push line   │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ───► line.quantity = n    │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► drop line            │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Checkout ───────────────► line_items() ────────► pricing engine       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Variant Lines
//! The same product in a different size or color is a different cart line.
//! Each line is keyed by its `cart_key` (product id + size + color), so
//! adding "Tee / M / Black" twice merges quantities while "Tee / L / Black"
//! stays its own line.
//!
//! ## Price Freezing
//! Unit price and resolved discount are captured when the item is added.
//! If the catalog changes afterwards, the cart keeps displaying (and the
//! order keeps paying) what the shopper saw.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::Discount;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::pricing::{self, LineItem};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID (UUID) for catalog lookups.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    /// This is critical: we lock in the price when added to cart.
    pub unit_price_cents: i64,

    /// Undiscounted price in cents, when the catalog advertised one
    /// (for strike-through display).
    pub original_price_cents: Option<i64>,

    /// Product image URL at time of adding (frozen).
    pub image_url: Option<String>,

    /// Selected size variant, if the product has sizes.
    pub size: Option<String>,

    /// Selected color variant, if the product has colors.
    pub color: Option<String>,

    /// Quantity in cart. Always 1..=MAX_ITEM_QUANTITY.
    pub quantity: i64,

    /// Resolved item discount at time of adding (frozen).
    pub discount: Option<Discount>,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// The key that identifies this line: product plus chosen variant.
    pub fn cart_key(&self) -> String {
        let mut key = self.product_id.clone();
        if let Some(size) = &self.size {
            key.push('-');
            key.push_str(size);
        }
        if let Some(color) = &self.color {
            key.push('-');
            key.push_str(color);
        }
        key
    }

    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Effective unit price after the frozen item discount.
    pub fn effective_unit_price(&self) -> Money {
        pricing::effective_price(self.unit_price(), self.discount.as_ref())
    }

    /// Converts this cart line into the engine's line item shape.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            discount: self.discount,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `cart_key` (adding the same variant merges quantity)
/// - Quantity is always 1..=MAX_ITEM_QUANTITY (updating to 0 removes the line)
/// - At most MAX_CART_ITEMS distinct lines
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart.
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line to the cart, merging with an existing line of the same
    /// cart key.
    ///
    /// ## Errors
    /// - [`PricingError::InvalidQuantity`] if the item's quantity is < 1
    /// - [`PricingError::QuantityTooLarge`] if the merged quantity would
    ///   exceed the per-line maximum
    /// - [`PricingError::CartTooLarge`] if a new line would exceed the
    ///   distinct-line maximum
    pub fn add_item(&mut self, item: CartItem) -> PricingResult<()> {
        if item.quantity < 1 {
            return Err(PricingError::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        let key = item.cart_key();
        if let Some(existing) = self.items.iter_mut().find(|i| i.cart_key() == key) {
            let new_qty = existing.quantity + item.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(PricingError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if item.quantity > MAX_ITEM_QUANTITY {
            return Err(PricingError::QuantityTooLarge {
                requested: item.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(PricingError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Updates the quantity of a line by cart key.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - Unknown cart key → [`PricingError::ItemNotInCart`]
    pub fn update_quantity(&mut self, cart_key: &str, quantity: i64) -> PricingResult<()> {
        if quantity == 0 {
            return self.remove_item(cart_key);
        }

        if quantity < 0 {
            return Err(PricingError::InvalidQuantity { quantity });
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(PricingError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.cart_key() == cart_key) {
            item.quantity = quantity;
            Ok(())
        } else {
            Err(PricingError::ItemNotInCart {
                cart_key: cart_key.to_string(),
            })
        }
    }

    /// Removes a line from the cart by cart key.
    pub fn remove_item(&mut self, cart_key: &str) -> PricingResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.cart_key() != cart_key);

        if self.items.len() == initial_len {
            Err(PricingError::ItemNotInCart {
                cart_key: cart_key.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Returns the number of distinct lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Produces the engine's line items for checkout.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(CartItem::to_line_item).collect()
    }

    /// Calculates the cart subtotal through the pricing engine.
    ///
    /// The cart's own invariants guarantee valid quantities, so this only
    /// fails if a caller has mutated `items` directly into a bad state.
    pub fn subtotal(&self) -> PricingResult<Money> {
        pricing::subtotal(&self.line_items())
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
