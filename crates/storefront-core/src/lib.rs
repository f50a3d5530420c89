//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains all pricing
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript)                        │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI ──► Order UI         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON API                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 API Routes (external collaborator)              │   │
//! │  │    catalog lookup, coupon lookup, order persistence            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ discount  │  │   cart    │  │  pricing  │  │   │
//! │  │   │   Money   │  │ Discount  │  │   Cart    │  │ subtotal  │  │   │
//! │  │   │  Percent  │  │ resolve   │  │ CartItem  │  │  coupons  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`discount`] - Item-level discount descriptors and resolution
//! - [`types`] - Coupons, order totals, coupon application results
//! - [`cart`] - Pure in-memory cart feeding the pricing engine
//! - [`pricing`] - The pricing engine itself (effective price → order total)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Clamped Results**: No computation ever yields a negative price or total
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::discount::{Discount, Percent};
//! use storefront_core::pricing::effective_price;
//!
//! // Create money from cents (never from floats!)
//! let base = Money::from_cents(10_000); // $100.00
//!
//! // A 10% item discount
//! let discount = Discount::Percentage(Percent::from_percentage(10.0));
//!
//! let price = effective_price(base, Some(&discount));
//! assert_eq!(price.cents(), 9_000); // $90.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::{Cart, CartItem};
pub use discount::{Discount, DiscountDescriptor, Percent};
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use pricing::{apply_coupon, effective_price, line_total, price_order, subtotal, LineItem};
pub use types::{Coupon, CouponApplication, CouponRejection, OrderTotals};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in a cart or order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-store in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;
