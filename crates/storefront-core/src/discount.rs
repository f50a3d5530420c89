//! # Discount Module
//!
//! Item-level and order-level discount representation.
//!
//! ## Two Shapes, One Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Discount Data Flow                                  │
//! │                                                                         │
//! │  Catalog / coupon record (wire)        Engine (typed)                  │
//! │  ──────────────────────────────        ──────────────                  │
//! │  { discountType: "percentage",   ──►   Discount::Percentage(15%)       │
//! │    discountValue: 15 }          resolve()                              │
//! │                                                                         │
//! │  { discountType: "fixed",        ──►   Discount::Fixed($10.00)         │
//! │    discountValue: 10 }                                                  │
//! │                                                                         │
//! │  { discountType: "bogof", ... }  ──►   None  (permissive: a malformed  │
//! │                                         discount never blocks a sale)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The raw [`DiscountDescriptor`] exists only at the system boundary; once
//! resolved, the engine works exclusively with the tagged [`Discount`]
//! variant. Percentage values are on the 0-100 scale (15 means 15%, not
//! 0.15). Values above 100 are not rejected - they simply clamp the priced
//! amount to zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15%, which covers fractional rates like 12.5% (1250 bps)
/// without touching floating point in the money path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a rate from a percentage on the 0-100 scale (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Percent((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A validated discount: either a percentage of the base amount or a fixed
/// amount off.
///
/// This is the tagged variant the engine computes with. It is constructed
/// at the boundary via [`DiscountDescriptor::resolve`] or directly by
/// trusted code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Discount {
    /// Percentage of the base amount (1500 bps = 15% off).
    Percentage(Percent),
    /// Fixed amount off, in cents.
    Fixed(Money),
}

impl Discount {
    /// Returns the amount this discount takes off `base`.
    ///
    /// The result is capped at `base`: a $10 discount on a $5 item takes
    /// off $5, and a 150% discount takes off exactly the base. This keeps
    /// the reported "discount applied" equal to what actually came off.
    pub fn amount_off(&self, base: Money) -> Money {
        let raw = match self {
            Discount::Percentage(rate) => base.apply_percent(*rate),
            Discount::Fixed(amount) => *amount,
        };
        if raw > base {
            base
        } else {
            raw
        }
    }
}

// =============================================================================
// Discount Descriptor (boundary shape)
// =============================================================================

/// The discount fields exactly as the catalog and coupon records carry them.
///
/// ## Permissive Resolution
/// The storefront must keep selling even when a record carries a malformed
/// discount, so `resolve()` never fails:
/// - missing kind, missing value, or value <= 0 → no discount
/// - unknown kind string → no discount
///
/// Rejecting bad records is the admin tooling's job, not checkout's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountDescriptor {
    /// "percentage" or "fixed"; anything else resolves to no discount.
    #[serde(alias = "discountType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Percentage on the 0-100 scale, or a fixed amount in major units.
    #[serde(alias = "discountValue", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl DiscountDescriptor {
    /// Resolves the raw record into a typed [`Discount`], or `None` when
    /// there is nothing to apply.
    pub fn resolve(&self) -> Option<Discount> {
        let value = self.value?;
        if value <= 0.0 || !value.is_finite() {
            return None;
        }

        match self.kind.as_deref() {
            Some("percentage") => Some(Discount::Percentage(Percent::from_percentage(value))),
            // Fixed values arrive in major units; convert to cents once, here.
            Some("fixed") => Some(Discount::Fixed(Money::from_cents(
                (value * 100.0).round() as i64,
            ))),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(kind: &str, value: f64) -> DiscountDescriptor {
        DiscountDescriptor {
            kind: Some(kind.to_string()),
            value: Some(value),
        }
    }

    #[test]
    fn test_percent_from_percentage() {
        assert_eq!(Percent::from_percentage(15.0).bps(), 1500);
        assert_eq!(Percent::from_percentage(8.25).bps(), 825);
        assert!((Percent::from_bps(1500).percentage() - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_resolve_percentage() {
        let discount = descriptor("percentage", 15.0).resolve().unwrap();
        assert_eq!(
            discount,
            Discount::Percentage(Percent::from_percentage(15.0))
        );
    }

    #[test]
    fn test_resolve_fixed_converts_to_cents() {
        let discount = descriptor("fixed", 10.0).resolve().unwrap();
        assert_eq!(discount, Discount::Fixed(Money::from_cents(1000)));

        let fractional = descriptor("fixed", 2.5).resolve().unwrap();
        assert_eq!(fractional, Discount::Fixed(Money::from_cents(250)));
    }

    #[test]
    fn test_resolve_unknown_kind_is_no_discount() {
        assert_eq!(descriptor("bogof", 50.0).resolve(), None);
        assert_eq!(descriptor("", 50.0).resolve(), None);
    }

    #[test]
    fn test_resolve_missing_or_zero_value_is_no_discount() {
        assert_eq!(DiscountDescriptor::default().resolve(), None);
        assert_eq!(descriptor("percentage", 0.0).resolve(), None);
        assert_eq!(descriptor("percentage", -5.0).resolve(), None);
        assert_eq!(
            DiscountDescriptor {
                kind: Some("percentage".to_string()),
                value: None,
            }
            .resolve(),
            None
        );
    }

    #[test]
    fn test_descriptor_accepts_wire_field_names() {
        let json = r#"{"discountType": "percentage", "discountValue": 10}"#;
        let descriptor: DiscountDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            descriptor.resolve(),
            Some(Discount::Percentage(Percent::from_percentage(10.0)))
        );
    }

    #[test]
    fn test_amount_off_caps_at_base() {
        let base = Money::from_cents(500);

        let fixed = Discount::Fixed(Money::from_cents(1000));
        assert_eq!(fixed.amount_off(base), base);

        let heavy = Discount::Percentage(Percent::from_percentage(150.0));
        assert_eq!(heavy.amount_off(base), base);
    }

    #[test]
    fn test_amount_off_percentage() {
        let base = Money::from_cents(10_000);
        let ten_pct = Discount::Percentage(Percent::from_percentage(10.0));
        assert_eq!(ten_pct.amount_off(base).cents(), 1000);
    }
}
