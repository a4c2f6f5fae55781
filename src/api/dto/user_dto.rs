//! User registration, lookup, and role-edit DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::persistence::models::UserRecord;

/// Request body for `POST /users` (idempotent registration).
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    /// Identity email; required.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Query filters for `GET /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    /// Exact email match; switches the response to a single record.
    #[serde(default)]
    pub email: Option<String>,
    /// Exact role match.
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for `PATCH /users?email=` (direct admin role edit).
#[derive(Debug, Deserialize)]
pub struct RoleEditRequest {
    /// New role; must be one of `guest`, `member`, `admin`.
    #[serde(default)]
    pub role: Option<String>,
}

/// A user as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    /// Row ID.
    pub id: Uuid,
    /// Identity email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Stored role string.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserDto {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            role: record.role,
            created_at: record.created_at,
        }
    }
}
