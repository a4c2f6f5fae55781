//! Agreement lifecycle DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::persistence::models::AgreementRecord;
use crate::persistence::repository::AcceptOutcome;

/// Request body for `POST /agreements`.
///
/// Every field is optional at the serde layer so that missing fields
/// surface as a structured validation error naming the field, rather
/// than a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubmitAgreementRequest {
    /// Owning user email; must match the authenticated caller.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Building block name.
    #[serde(default)]
    pub block: Option<String>,
    /// Floor number.
    #[serde(default)]
    pub floor: Option<i32>,
    /// Apartment number within the floor.
    #[serde(default)]
    pub apartment_no: Option<i32>,
    /// Monthly rent.
    #[serde(default)]
    pub rent: Option<i64>,
}

/// Request body for `PATCH /agreements/{id}/accept`.
#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    /// Email of the user to promote; cross-checked against the
    /// agreement's owning email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Response body for `PATCH /agreements/{id}/accept`: both update
/// outcomes, reported separately.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AcceptResponse {
    /// Agreements whose status moved to `checked` (0 or 1).
    pub agreement_updated: u64,
    /// Users whose role moved to `member` (0 or 1).
    pub user_updated: u64,
}

impl From<AcceptOutcome> for AcceptResponse {
    fn from(outcome: AcceptOutcome) -> Self {
        Self {
            agreement_updated: outcome.agreement_updated,
            user_updated: outcome.user_updated,
        }
    }
}

/// An agreement as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AgreementDto {
    /// Row ID.
    pub id: Uuid,
    /// Owning user email.
    pub user_email: String,
    /// Building block name.
    pub block: String,
    /// Floor number.
    pub floor: i32,
    /// Apartment number within the floor.
    pub apartment_no: i32,
    /// Monthly rent at submission time.
    pub rent: i64,
    /// Stored status (`pending` or `checked`).
    pub status: String,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<AgreementRecord> for AgreementDto {
    fn from(record: AgreementRecord) -> Self {
        Self {
            id: record.id,
            user_email: record.user_email,
            block: record.block,
            floor: record.floor,
            apartment_no: record.apartment_no,
            rent: record.rent,
            status: record.status,
            created_at: record.created_at,
        }
    }
}
