//! PostgreSQL implementation of the storage layer.
//!
//! [`PgStore`] is the single explicitly-owned storage handle, built once
//! at startup and injected into every component that needs it.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    AgreementRecord, AnnouncementRecord, ApartmentRecord, CouponRecord, PaymentRecord, UserRecord,
};
use super::repository::{AcceptOutcome, AgreementStore, RoleStore};
use crate::domain::pagination::{PAGE_SIZE, PageRequest};
use crate::domain::{AgreementStatus, NewAgreement, Role};
use crate::error::ApiError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Idempotent registration: inserts a user with the default `guest`
    /// role, or returns the existing record untouched.
    ///
    /// The second element is `true` when a new row was created. Relies
    /// on `ON CONFLICT DO NOTHING` so two concurrent registrations for
    /// the same email can never produce duplicates or overwrites.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn register_user(
        &self,
        email: &str,
        name: &str,
    ) -> Result<(UserRecord, bool), ApiError> {
        let inserted = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (email, name) VALUES ($1, $2) \
             ON CONFLICT (email) DO NOTHING \
             RETURNING id, email, name, role, created_at",
        )
        .bind(email)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(user) = inserted {
            return Ok((user, true));
        }

        let existing = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok((existing, false))
    }

    /// Users filtered by optional email and role.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn find_users(
        &self,
        email: Option<&str>,
        role: Option<&str>,
    ) -> Result<Vec<UserRecord>, ApiError> {
        let rows = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, name, role, created_at FROM users \
             WHERE ($1::text IS NULL OR email = $1) AND ($2::text IS NULL OR role = $2) \
             ORDER BY created_at",
        )
        .bind(email)
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Direct admin role override. Returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn set_role(&self, email: &str, role: Role) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE users SET role = $1 WHERE email = $2")
            .bind(role.as_str())
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ── Apartments ──────────────────────────────────────────────────────

    /// One catalog page filtered by rent bounds, plus the filtered total.
    ///
    /// The total counts the *filtered* set so callers can derive the
    /// page count from matches, not the whole table.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_apartments(
        &self,
        page: PageRequest,
        min_rent: Option<i64>,
        max_rent: Option<i64>,
    ) -> Result<(Vec<ApartmentRecord>, i64), ApiError> {
        let min = min_rent.unwrap_or(0);
        let max = max_rent.unwrap_or(i64::MAX);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM apartments WHERE rent >= $1 AND rent <= $2",
        )
        .bind(min)
        .bind(max)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ApartmentRecord>(
            "SELECT id, block, floor, apartment_no, rent, image_url FROM apartments \
             WHERE rent >= $1 AND rent <= $2 \
             ORDER BY block, floor, apartment_no \
             LIMIT $3 OFFSET $4",
        )
        .bind(min)
        .bind(max)
        .bind(PAGE_SIZE)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    // ── Coupons ─────────────────────────────────────────────────────────

    /// All stored coupons.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_coupons(&self) -> Result<Vec<CouponRecord>, ApiError> {
        let rows = sqlx::query_as::<_, CouponRecord>(
            "SELECT id, code, discount_pct, expires_at, description FROM coupons \
             ORDER BY expires_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Coupon lookup by code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn find_coupon(&self, code: &str) -> Result<Option<CouponRecord>, ApiError> {
        let row = sqlx::query_as::<_, CouponRecord>(
            "SELECT id, code, discount_pct, expires_at, description FROM coupons WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a coupon. Coupons are immutable once created.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] on a duplicate code,
    /// [`ApiError::Persistence`] otherwise.
    pub async fn insert_coupon(
        &self,
        code: &str,
        discount_pct: i32,
        expires_at: DateTime<Utc>,
        description: &str,
    ) -> Result<CouponRecord, ApiError> {
        let row = sqlx::query_as::<_, CouponRecord>(
            "INSERT INTO coupons (code, discount_pct, expires_at, description) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, code, discount_pct, expires_at, description",
        )
        .bind(code)
        .bind(discount_pct)
        .bind(expires_at)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    // ── Payments ────────────────────────────────────────────────────────

    /// Appends a ledger entry with a server-side timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn insert_payment(
        &self,
        payer_email: &str,
        amount: i64,
    ) -> Result<PaymentRecord, ApiError> {
        let row = sqlx::query_as::<_, PaymentRecord>(
            "INSERT INTO payments (payer_email, amount) VALUES ($1, $2) \
             RETURNING id, payer_email, amount, paid_at",
        )
        .bind(payer_email)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Ledger entries for one payer, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_payments(&self, payer_email: &str) -> Result<Vec<PaymentRecord>, ApiError> {
        let rows = sqlx::query_as::<_, PaymentRecord>(
            "SELECT id, payer_email, amount, paid_at FROM payments \
             WHERE payer_email = $1 ORDER BY paid_at DESC",
        )
        .bind(payer_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ── Announcements ───────────────────────────────────────────────────

    /// All notices, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn list_announcements(&self) -> Result<Vec<AnnouncementRecord>, ApiError> {
        let rows = sqlx::query_as::<_, AnnouncementRecord>(
            "SELECT id, title, description, importance, kind, created_at FROM announcements \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Appends a notice with a server-side timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on database failure.
    pub async fn insert_announcement(
        &self,
        title: &str,
        description: &str,
        importance: &str,
        kind: &str,
    ) -> Result<AnnouncementRecord, ApiError> {
        let row = sqlx::query_as::<_, AnnouncementRecord>(
            "INSERT INTO announcements (title, description, importance, kind) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, description, importance, kind, created_at",
        )
        .bind(title)
        .bind(description)
        .bind(importance)
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn role_of(&self, email: &str) -> Result<Option<Role>, ApiError> {
        let stored = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        stored.map(|s| Role::from_str(&s)).transpose()
    }
}

#[async_trait]
impl AgreementStore for PgStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AgreementRecord>, ApiError> {
        let row = sqlx::query_as::<_, AgreementRecord>(
            "SELECT id, user_email, block, floor, apartment_no, rent, status, created_at \
             FROM agreements WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_for_user(&self, email: &str) -> Result<Vec<AgreementRecord>, ApiError> {
        let rows = sqlx::query_as::<_, AgreementRecord>(
            "SELECT id, user_email, block, floor, apartment_no, rent, status, created_at \
             FROM agreements WHERE user_email = $1 ORDER BY created_at",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert(&self, submission: &NewAgreement) -> Result<AgreementRecord, ApiError> {
        let row = sqlx::query_as::<_, AgreementRecord>(
            "INSERT INTO agreements (user_email, block, floor, apartment_no, rent) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, user_email, block, floor, apartment_no, rent, status, created_at",
        )
        .bind(&submission.user_email)
        .bind(&submission.apartment.block)
        .bind(submission.apartment.floor)
        .bind(submission.apartment.apartment_no)
        .bind(submission.rent)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(ref db_err) = err
                && db_err.is_unique_violation()
            {
                ApiError::Conflict("user already has an agreement".to_string())
            } else {
                ApiError::from(err)
            }
        })?;

        Ok(row)
    }

    async fn accept(&self, id: Uuid, user_email: &str) -> Result<AcceptOutcome, ApiError> {
        let mut tx = self.pool.begin().await?;

        let agreement = sqlx::query("UPDATE agreements SET status = $1 WHERE id = $2")
            .bind(AgreementStatus::Checked.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Guarded promotion: member is re-applied idempotently, admin is
        // never moved by the lifecycle manager.
        let user = sqlx::query("UPDATE users SET role = $1 WHERE email = $2 AND role <> $3")
            .bind(Role::Member.as_str())
            .bind(user_email)
            .bind(Role::Admin.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AcceptOutcome {
            agreement_updated: agreement.rows_affected(),
            user_updated: user.rows_affected(),
        })
    }

    async fn mark_checked(&self, id: Uuid) -> Result<u64, ApiError> {
        let result = sqlx::query("UPDATE agreements SET status = $1 WHERE id = $2")
            .bind(AgreementStatus::Checked.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
