//! # Domain Types
//!
//! Coupons and order-total types used by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │     Coupon      │   │  CouponApplication  │   │   OrderTotals   │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  code           │   │  discount_cents     │   │  subtotal_cents │   │
//! │  │  discount       │   │  total_cents        │   │  discount_cents │   │
//! │  │  min purchase   │   │  rejection?         │   │  total_cents    │   │
//! │  │  expiry/usage   │   └─────────────────────┘   └─────────────────┘   │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  CouponRejection: why a coupon did not apply. This is DATA in the      │
//! │  result, never an error - the shopper gets a message, the order        │
//! │  proceeds at full price.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::Discount;
use crate::money::Money;

// =============================================================================
// Coupon
// =============================================================================

/// An order-level coupon, applied once to the order subtotal.
///
/// Supplied by the coupon lookup collaborator; the engine only evaluates it.
/// Codes are stored uppercase and unique upstream.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Coupon code as entered at checkout (uppercase).
    pub code: String,

    /// Optional human-readable description for the shopper.
    pub description: Option<String>,

    /// The discount this coupon grants.
    pub discount: Discount,

    /// Minimum order subtotal (in cents) for the coupon to apply.
    pub min_purchase_cents: Option<i64>,

    /// Maximum number of redemptions allowed, if capped.
    pub max_usage_count: Option<i64>,

    /// Redemptions so far.
    pub usage_count: i64,

    /// When the coupon stops being valid, if it expires.
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<DateTime<Utc>>,

    /// Whether the coupon is currently enabled.
    pub is_active: bool,
}

impl Coupon {
    /// Checks whether this coupon applies to an order with the given
    /// subtotal at the given instant.
    ///
    /// Checks run in lifecycle order; the first failure is reported.
    /// `now` is passed in rather than read from the clock so the check
    /// stays pure and testable.
    pub fn eligibility(&self, subtotal: Money, now: DateTime<Utc>) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }

        if let Some(expiry) = self.expiry_date {
            if expiry < now {
                return Err(CouponRejection::Expired);
            }
        }

        if let Some(max) = self.max_usage_count {
            if self.usage_count >= max {
                return Err(CouponRejection::UsageLimitReached);
            }
        }

        if let Some(required) = self.min_purchase_cents {
            if subtotal.cents() < required {
                return Err(CouponRejection::MinPurchaseNotMet {
                    required_cents: required,
                    subtotal_cents: subtotal.cents(),
                });
            }
        }

        Ok(())
    }

    /// Returns the minimum purchase threshold as Money, if set.
    #[inline]
    pub fn min_purchase(&self) -> Option<Money> {
        self.min_purchase_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Coupon Rejection
// =============================================================================

/// Why a coupon did not apply to an order.
///
/// ## Not an Error
/// An ineligible coupon is a normal checkout outcome: the order proceeds
/// at full price and the shopper is told why ("minimum purchase not met").
/// That is why this is a serializable enum in the result, not a variant of
/// `PricingError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CouponRejection {
    /// Coupon has been disabled by an admin.
    Inactive,
    /// Coupon's expiry date is in the past.
    Expired,
    /// Coupon has been redeemed its maximum number of times.
    UsageLimitReached,
    /// Order subtotal is below the coupon's minimum purchase amount.
    MinPurchaseNotMet {
        required_cents: i64,
        subtotal_cents: i64,
    },
}

// =============================================================================
// Coupon Application
// =============================================================================

/// The outcome of applying (or failing to apply) a coupon to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponApplication {
    /// Amount the coupon took off the subtotal. Zero when rejected or absent.
    pub discount_cents: i64,

    /// Subtotal minus the discount. Never negative.
    pub total_cents: i64,

    /// Present when a coupon was supplied but did not apply.
    pub rejection: Option<CouponRejection>,
}

impl CouponApplication {
    /// Returns the applied discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the post-coupon total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The pricing engine's final output for an order.
///
/// Computed fresh per call and handed to the order-persistence collaborator;
/// the engine itself never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of line totals before any order-level discount.
    pub subtotal_cents: i64,

    /// Order-level (coupon) discount taken off the subtotal.
    pub discount_cents: i64,

    /// Final amount due. Never negative.
    pub total_cents: i64,

    /// Present when a coupon was supplied but did not apply.
    pub coupon_rejection: Option<CouponRejection>,
}

impl OrderTotals {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the order-level discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
