//! # Pricing Engine
//!
//! The pure function pipeline that turns catalog prices into order totals.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Pipeline                                  │
//! │                                                                         │
//! │  catalog price ──► effective_price ──► line_total ──► subtotal         │
//! │  (+ item discount)    (clamped ≥ 0)    (× quantity)   (Σ lines)        │
//! │                                                           │             │
//! │                                                           ▼             │
//! │                                         apply_coupon ──► OrderTotals   │
//! │                                         (eligibility,                   │
//! │                                          clamped ≥ 0)                   │
//! │                                                                         │
//! │  One direction. No state. No clock reads. Safe under any concurrency.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No function here ever returns a negative amount
//! - An invalid quantity fails the whole computation; no partial totals
//! - An ineligible coupon is data in the result, never an error

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::Discount;
use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::types::{Coupon, CouponApplication, OrderTotals};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Effective Unit Price
// =============================================================================

/// Computes the effective unit price after an optional item-level discount.
///
/// ## Rules
/// - No discount → base price unchanged
/// - Percentage → `base − base × pct`, rounded once
/// - Fixed → `base − amount`
/// - Always clamped to zero: an over-large discount makes the item free,
///   never negative
///
/// ## Example
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::discount::{Discount, Percent};
/// use storefront_core::pricing::effective_price;
///
/// let base = Money::from_cents(10_000); // $100.00
///
/// let pct = Discount::Percentage(Percent::from_percentage(10.0));
/// assert_eq!(effective_price(base, Some(&pct)).cents(), 9_000);
///
/// let fixed = Discount::Fixed(Money::from_cents(1_000));
/// assert_eq!(effective_price(base, Some(&fixed)).cents(), 9_000);
///
/// assert_eq!(effective_price(base, None), base);
/// ```
pub fn effective_price(base: Money, discount: Option<&Discount>) -> Money {
    match discount {
        Some(d) => base.sub_clamped(d.amount_off(base)),
        None => base,
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry within an order, as the engine sees it.
///
/// Owned transiently by the caller (cart or checkout); the engine never
/// stores it. The discount is the *resolved* item discount frozen when the
/// product entered the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unit price in cents before any discount.
    pub unit_price_cents: i64,

    /// Quantity ordered. Must be >= 1.
    pub quantity: i64,

    /// Item-level discount, if any.
    pub discount: Option<Discount>,
}

impl LineItem {
    /// Creates an undiscounted line item.
    pub fn new(unit_price_cents: i64, quantity: i64) -> Self {
        LineItem {
            unit_price_cents,
            quantity,
            discount: None,
        }
    }

    /// Creates a discounted line item.
    pub fn discounted(unit_price_cents: i64, quantity: i64, discount: Discount) -> Self {
        LineItem {
            unit_price_cents,
            quantity,
            discount: Some(discount),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Line Total
// =============================================================================

/// Computes a line's total: effective unit price × quantity.
///
/// ## Errors
/// - [`PricingError::InvalidQuantity`] when quantity < 1
/// - [`PricingError::QuantityTooLarge`] when quantity exceeds
///   [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY)
pub fn line_total(item: &LineItem) -> PricingResult<Money> {
    if item.quantity < 1 {
        return Err(PricingError::InvalidQuantity {
            quantity: item.quantity,
        });
    }

    if item.quantity > MAX_ITEM_QUANTITY {
        return Err(PricingError::QuantityTooLarge {
            requested: item.quantity,
            max: MAX_ITEM_QUANTITY,
        });
    }

    let unit = effective_price(item.unit_price(), item.discount.as_ref());
    Ok(unit.multiply_quantity(item.quantity))
}

// =============================================================================
// Order Subtotal
// =============================================================================

/// Sums line totals into an order subtotal.
///
/// Addition is commutative; no ordering is relied on. An empty order has a
/// zero subtotal. The first invalid line fails the whole computation - no
/// partial totals are returned.
pub fn subtotal(items: &[LineItem]) -> PricingResult<Money> {
    let mut sum = Money::zero();
    for item in items {
        sum += line_total(item)?;
    }
    Ok(sum)
}

// =============================================================================
// Coupon Application
// =============================================================================

/// Applies an optional order-level coupon to a subtotal.
///
/// ## Behavior
/// - No coupon → discount 0, total = subtotal
/// - Ineligible coupon (inactive, expired, used up, or minimum purchase not
///   met) → discount 0, total = subtotal, with the rejection reason in the
///   result so the caller can message the shopper
/// - Eligible coupon → same percentage/fixed rule as item discounts,
///   clamped so the total never goes negative
///
/// `now` is the evaluation instant for expiry checks; passing it in keeps
/// this function pure.
pub fn apply_coupon(
    subtotal: Money,
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
) -> CouponApplication {
    let Some(coupon) = coupon else {
        return CouponApplication {
            discount_cents: 0,
            total_cents: subtotal.cents(),
            rejection: None,
        };
    };

    if let Err(rejection) = coupon.eligibility(subtotal, now) {
        return CouponApplication {
            discount_cents: 0,
            total_cents: subtotal.cents(),
            rejection: Some(rejection),
        };
    }

    let discount = coupon.discount.amount_off(subtotal);
    CouponApplication {
        discount_cents: discount.cents(),
        total_cents: subtotal.sub_clamped(discount).cents(),
        rejection: None,
    }
}

// =============================================================================
// Full Pipeline
// =============================================================================

/// Prices a whole order: line totals → subtotal → optional coupon → totals.
///
/// This is the entry point checkout calls. Line items and coupon come from
/// the caller's collaborators (cart, coupon lookup); the result goes to the
/// order-persistence collaborator. Nothing is stored here.
pub fn price_order(
    items: &[LineItem],
    coupon: Option<&Coupon>,
    now: DateTime<Utc>,
) -> PricingResult<OrderTotals> {
    let subtotal = subtotal(items)?;
    let application = apply_coupon(subtotal, coupon, now);

    Ok(OrderTotals {
        subtotal_cents: subtotal.cents(),
        discount_cents: application.discount_cents,
        total_cents: application.total_cents,
        coupon_rejection: application.rejection,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::Percent;
    use proptest::prelude::*;

    fn pct(value: f64) -> Discount {
        Discount::Percentage(Percent::from_percentage(value))
    }

    fn fixed(cents: i64) -> Discount {
        Discount::Fixed(Money::from_cents(cents))
    }

    fn coupon(discount: Discount, min_purchase_cents: Option<i64>) -> Coupon {
        Coupon {
            code: "TEST".to_string(),
            description: None,
            discount,
            min_purchase_cents,
            max_usage_count: None,
            usage_count: 0,
            expiry_date: None,
            is_active: true,
        }
    }

    // -------------------------------------------------------------------------
    // effective_price
    // -------------------------------------------------------------------------

    #[test]
    fn test_effective_price_no_discount() {
        let base = Money::from_cents(10_000);
        assert_eq!(effective_price(base, None), base);
    }

    #[test]
    fn test_effective_price_percentage() {
        // $100.00 at 10% off = $90.00
        let base = Money::from_cents(10_000);
        assert_eq!(effective_price(base, Some(&pct(10.0))).cents(), 9_000);
    }

    #[test]
    fn test_effective_price_fixed() {
        // $100.00 minus $10.00 = $90.00
        let base = Money::from_cents(10_000);
        assert_eq!(effective_price(base, Some(&fixed(1_000))).cents(), 9_000);
    }

    #[test]
    fn test_effective_price_clamps_to_zero() {
        // $5.00 minus $10.00 clamps to free, never negative
        let base = Money::from_cents(500);
        assert_eq!(effective_price(base, Some(&fixed(1_000))), Money::zero());
    }

    #[test]
    fn test_effective_price_over_100_percent_clamps() {
        let base = Money::from_cents(500);
        assert_eq!(effective_price(base, Some(&pct(150.0))), Money::zero());
    }

    // -------------------------------------------------------------------------
    // line_total
    // -------------------------------------------------------------------------

    #[test]
    fn test_line_total() {
        let item = LineItem::new(3_000, 2);
        assert_eq!(line_total(&item).unwrap().cents(), 6_000);
    }

    #[test]
    fn test_line_total_applies_discount_per_unit() {
        // 10% off $10.00, × 3 = $27.00
        let item = LineItem::discounted(1_000, 3, pct(10.0));
        assert_eq!(line_total(&item).unwrap().cents(), 2_700);
    }

    #[test]
    fn test_line_total_rejects_bad_quantity() {
        assert!(matches!(
            line_total(&LineItem::new(1_000, 0)),
            Err(PricingError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            line_total(&LineItem::new(1_000, -3)),
            Err(PricingError::InvalidQuantity { quantity: -3 })
        ));
        assert!(matches!(
            line_total(&LineItem::new(1_000, 1_000)),
            Err(PricingError::QuantityTooLarge { .. })
        ));
    }

    // -------------------------------------------------------------------------
    // subtotal
    // -------------------------------------------------------------------------

    #[test]
    fn test_subtotal_empty_is_zero() {
        assert_eq!(subtotal(&[]).unwrap(), Money::zero());
    }

    #[test]
    fn test_subtotal_sums_lines() {
        // $30.00 × 2 + $10.00 × 1 = $70.00
        let items = [LineItem::new(3_000, 2), LineItem::new(1_000, 1)];
        assert_eq!(subtotal(&items).unwrap().cents(), 7_000);
    }

    #[test]
    fn test_subtotal_order_independent() {
        let a = [LineItem::new(3_000, 2), LineItem::new(1_000, 1)];
        let b = [LineItem::new(1_000, 1), LineItem::new(3_000, 2)];
        assert_eq!(subtotal(&a).unwrap(), subtotal(&b).unwrap());
    }

    #[test]
    fn test_subtotal_fails_fast_on_invalid_line() {
        let items = [LineItem::new(3_000, 2), LineItem::new(1_000, 0)];
        assert!(subtotal(&items).is_err());
    }

    // -------------------------------------------------------------------------
    // apply_coupon
    // -------------------------------------------------------------------------

    #[test]
    fn test_apply_coupon_absent() {
        let result = apply_coupon(Money::from_cents(8_000), None, Utc::now());
        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.total_cents, 8_000);
        assert!(result.rejection.is_none());
    }

    #[test]
    fn test_apply_coupon_min_purchase_not_met() {
        // $80.00 order, $10 coupon requiring $100 minimum → full price
        let c = coupon(fixed(1_000), Some(10_000));
        let result = apply_coupon(Money::from_cents(8_000), Some(&c), Utc::now());
        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.total_cents, 8_000);
        assert_eq!(
            result.rejection,
            Some(crate::types::CouponRejection::MinPurchaseNotMet {
                required_cents: 10_000,
                subtotal_cents: 8_000,
            })
        );
    }

    #[test]
    fn test_apply_coupon_percentage() {
        // $150.00 order, 15% coupon with $100 minimum → $22.50 off, $127.50 due
        let c = coupon(pct(15.0), Some(10_000));
        let result = apply_coupon(Money::from_cents(15_000), Some(&c), Utc::now());
        assert_eq!(result.discount_cents, 2_250);
        assert_eq!(result.total_cents, 12_750);
        assert!(result.rejection.is_none());
    }

    #[test]
    fn test_apply_coupon_fixed_clamps() {
        // $5.00 order, $10.00 coupon → total clamps at zero
        let c = coupon(fixed(1_000), None);
        let result = apply_coupon(Money::from_cents(500), Some(&c), Utc::now());
        assert_eq!(result.discount_cents, 500);
        assert_eq!(result.total_cents, 0);
    }

    // -------------------------------------------------------------------------
    // price_order
    // -------------------------------------------------------------------------

    #[test]
    fn test_price_order_full_pipeline() {
        let items = [
            LineItem::discounted(10_000, 1, pct(10.0)), // $90.00
            LineItem::new(3_000, 2),                    // $60.00
        ];
        let c = coupon(pct(15.0), Some(10_000));

        let totals = price_order(&items, Some(&c), Utc::now()).unwrap();
        assert_eq!(totals.subtotal_cents, 15_000);
        assert_eq!(totals.discount_cents, 2_250);
        assert_eq!(totals.total_cents, 12_750);
        assert!(totals.coupon_rejection.is_none());
    }

    #[test]
    fn test_price_order_surfaces_rejection() {
        let items = [LineItem::new(3_000, 1)];
        let c = coupon(fixed(1_000), Some(10_000));

        let totals = price_order(&items, Some(&c), Utc::now()).unwrap();
        assert_eq!(totals.subtotal_cents, 3_000);
        assert_eq!(totals.total_cents, 3_000);
        assert!(totals.coupon_rejection.is_some());
    }

    #[test]
    fn test_price_order_empty_cart() {
        let totals = price_order(&[], None, Utc::now()).unwrap();
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn test_price_order_rejects_invalid_quantity_outright() {
        let items = [LineItem::new(3_000, 0)];
        assert!(price_order(&items, None, Utc::now()).is_err());
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    proptest! {
        /// No discount leaves the base price untouched.
        #[test]
        fn prop_no_discount_is_identity(base in 0i64..10_000_000) {
            let money = Money::from_cents(base);
            prop_assert_eq!(effective_price(money, None), money);
        }

        /// Effective price never goes negative, whatever the discount.
        #[test]
        fn prop_effective_price_non_negative(
            base in 0i64..10_000_000,
            bps in 0u32..30_000,
        ) {
            let discount = Discount::Percentage(Percent::from_bps(bps));
            let price = effective_price(Money::from_cents(base), Some(&discount));
            prop_assert!(!price.is_negative());
        }

        /// Effective price is monotonically non-increasing in the
        /// percentage value.
        #[test]
        fn prop_percentage_monotone(
            base in 0i64..10_000_000,
            bps in 0u32..10_000,
            bump in 1u32..500,
        ) {
            let money = Money::from_cents(base);
            let lighter = Discount::Percentage(Percent::from_bps(bps));
            let heavier = Discount::Percentage(Percent::from_bps(bps + bump));
            prop_assert!(
                effective_price(money, Some(&heavier))
                    <= effective_price(money, Some(&lighter))
            );
        }

        /// Purity: the same inputs always give the same output.
        #[test]
        fn prop_effective_price_idempotent(
            base in 0i64..10_000_000,
            bps in 0u32..20_000,
        ) {
            let money = Money::from_cents(base);
            let discount = Discount::Percentage(Percent::from_bps(bps));
            prop_assert_eq!(
                effective_price(money, Some(&discount)),
                effective_price(money, Some(&discount))
            );
        }

        /// A coupon never produces a negative total, and the discount it
        /// reports is exactly the subtotal/total gap.
        #[test]
        fn prop_coupon_accounting_consistent(
            sub in 0i64..10_000_000,
            off in 0i64..20_000_000,
        ) {
            let c = coupon(fixed(off), None);
            let result = apply_coupon(Money::from_cents(sub), Some(&c), Utc::now());
            prop_assert!(result.total_cents >= 0);
            prop_assert_eq!(result.discount_cents + result.total_cents, sub);
        }
    }
}
