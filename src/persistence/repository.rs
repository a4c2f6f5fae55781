//! Store seams consumed by the authorization gate and the lifecycle
//! manager.
//!
//! The gate and the lifecycle carry the system's real invariants, so
//! their storage access goes through traits: production wires in
//! [`super::postgres::PgStore`], tests wire in in-memory fakes and
//! exercise the two components independently.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use super::models::AgreementRecord;
use crate::domain::{NewAgreement, Role};
use crate::error::ApiError;

/// Read-only role lookup: the single source of truth for authorization
/// decisions.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug {
    /// Returns the role stored for `email`, or `None` when no user
    /// record exists.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn role_of(&self, email: &str) -> Result<Option<Role>, ApiError>;
}

/// Affected-row counts from the two-field accept update.
///
/// Zero on either side means the corresponding filter matched nothing;
/// that is reported, never treated as a crash.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AcceptOutcome {
    /// Agreements whose status was set to `checked` (0 or 1).
    pub agreement_updated: u64,
    /// Users whose role was set to `member` (0 or 1).
    pub user_updated: u64,
}

/// Agreement reads and lifecycle writes.
#[async_trait]
pub trait AgreementStore: Send + Sync + std::fmt::Debug {
    /// Looks up one agreement by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AgreementRecord>, ApiError>;

    /// All agreements owned by `email` (0 or 1 rows given the unique
    /// index; a list for API compatibility).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn find_for_user(&self, email: &str) -> Result<Vec<AgreementRecord>, ApiError>;

    /// Inserts a pending agreement with a server-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Conflict`] when the owner already holds an
    /// agreement (unique-index violation), [`ApiError::Persistence`]
    /// otherwise.
    async fn insert(&self, submission: &NewAgreement) -> Result<AgreementRecord, ApiError>;

    /// Accept branch: marks the agreement `checked` and advances the
    /// user's role to `member`, atomically.
    ///
    /// The role write is guarded so an `admin` is never moved; a repeat
    /// call re-applies `member` idempotently.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure; the
    /// transaction rolls back and neither write sticks.
    async fn accept(&self, id: Uuid, user_email: &str) -> Result<AcceptOutcome, ApiError>;

    /// Reject branch: marks the agreement `checked`, touching no role.
    /// Returns the affected-row count (0 when the ID matched nothing).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    async fn mark_checked(&self, id: Uuid) -> Result<u64, ApiError>;
}
