//! Coupon validation verdicts.
//!
//! The decision is a pure function of the stored coupon and the clock;
//! callers pass `Utc::now()` so the expiry comparison re-evaluates on
//! every request and tests can pin the clock.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of validating a coupon code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponVerdict {
    /// Whether the coupon may be applied.
    pub valid: bool,
    /// Discount percentage, present only when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<i32>,
    /// Human-readable reason.
    pub message: String,
}

impl CouponVerdict {
    /// The code does not exist.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            valid: false,
            discount_percentage: None,
            message: "coupon not found".to_string(),
        }
    }

    /// The code exists but its expiry has passed.
    #[must_use]
    pub fn expired() -> Self {
        Self {
            valid: false,
            discount_percentage: None,
            message: "coupon expired".to_string(),
        }
    }

    /// The code is live; carries the stored discount.
    #[must_use]
    pub fn valid(discount_percentage: i32) -> Self {
        Self {
            valid: true,
            discount_percentage: Some(discount_percentage),
            message: "coupon is valid".to_string(),
        }
    }
}

/// Evaluates a stored coupon against the given instant.
#[must_use]
pub fn evaluate(expires_at: DateTime<Utc>, discount_pct: i32, now: DateTime<Utc>) -> CouponVerdict {
    if expires_at < now {
        CouponVerdict::expired()
    } else {
        CouponVerdict::valid(discount_pct)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn future_expiry_is_valid_with_numeric_discount() {
        let now = Utc::now();
        let verdict = evaluate(now + Duration::days(7), 15, now);
        assert!(verdict.valid);
        assert_eq!(verdict.discount_percentage, Some(15));
    }

    #[test]
    fn past_expiry_is_expired() {
        let now = Utc::now();
        let verdict = evaluate(now - Duration::seconds(1), 15, now);
        assert!(!verdict.valid);
        assert_eq!(verdict.discount_percentage, None);
        assert!(verdict.message.contains("expired"));
    }

    #[test]
    fn expiry_exactly_now_still_counts_as_live() {
        let now = Utc::now();
        let verdict = evaluate(now, 10, now);
        assert!(verdict.valid);
    }

    #[test]
    fn not_found_verdict_has_reason() {
        let verdict = CouponVerdict::not_found();
        assert!(!verdict.valid);
        assert!(verdict.message.contains("not found"));
    }
}
