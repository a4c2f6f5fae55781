//! Coupon catalog and validation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::persistence::models::CouponRecord;

/// Query parameter for `GET /validate-coupon`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateCouponQuery {
    /// Coupon code to validate; required.
    #[serde(default)]
    pub code: Option<String>,
}

/// Request body for `POST /coupons`.
#[derive(Debug, Deserialize)]
pub struct CreateCouponRequest {
    /// Lookup code.
    #[serde(default)]
    pub code: Option<String>,
    /// Discount percentage.
    #[serde(default)]
    pub discount_pct: Option<i32>,
    /// Expiry instant.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Marketing copy shown with the coupon.
    #[serde(default)]
    pub description: Option<String>,
}

/// A coupon as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CouponDto {
    /// Row ID.
    pub id: Uuid,
    /// Lookup code.
    pub code: String,
    /// Discount percentage.
    pub discount_pct: i32,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Marketing copy shown with the coupon.
    pub description: String,
}

impl From<CouponRecord> for CouponDto {
    fn from(record: CouponRecord) -> Self {
        Self {
            id: record.id,
            code: record.code,
            discount_pct: record.discount_pct,
            expires_at: record.expires_at,
            description: record.description,
        }
    }
}
