//! Database row models, one struct per table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    /// Row ID.
    pub id: Uuid,
    /// Unique identity email. Immutable after creation.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Stored role string (`guest`, `member`, or `admin`).
    pub role: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A row from the `apartments` table. Immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApartmentRecord {
    /// Row ID.
    pub id: Uuid,
    /// Building block name.
    pub block: String,
    /// Floor number.
    pub floor: i32,
    /// Apartment number within the floor.
    pub apartment_no: i32,
    /// Monthly rent.
    pub rent: i64,
    /// Catalog image reference.
    pub image_url: String,
}

/// A row from the `agreements` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AgreementRecord {
    /// Row ID.
    pub id: Uuid,
    /// Owning user email; at most one agreement per email.
    pub user_email: String,
    /// Building block name.
    pub block: String,
    /// Floor number.
    pub floor: i32,
    /// Apartment number within the floor.
    pub apartment_no: i32,
    /// Monthly rent at submission time.
    pub rent: i64,
    /// Stored status string (`pending` or `checked`).
    pub status: String,
    /// Server-assigned creation timestamp, never client-supplied.
    pub created_at: DateTime<Utc>,
}

/// A row from the `coupons` table. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CouponRecord {
    /// Row ID.
    pub id: Uuid,
    /// Lookup code.
    pub code: String,
    /// Discount percentage.
    pub discount_pct: i32,
    /// Expiry instant; compared against the wall clock on every
    /// validation call.
    pub expires_at: DateTime<Utc>,
    /// Marketing copy shown with the coupon.
    pub description: String,
}

/// A row from the append-only `payments` ledger.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaymentRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// Paying user's email.
    pub payer_email: String,
    /// Amount paid, in minor units.
    pub amount: i64,
    /// Server-side payment timestamp.
    pub paid_at: DateTime<Utc>,
}

/// A row from the append-only `announcements` board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnnouncementRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// Notice title.
    pub title: String,
    /// Notice body.
    pub description: String,
    /// Importance marker (free-form, e.g. `high`).
    pub importance: String,
    /// Notice category (free-form, e.g. `maintenance`).
    pub kind: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
