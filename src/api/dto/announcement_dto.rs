//! Announcement board DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::models::AnnouncementRecord;

/// Request body for `POST /announcements`.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    /// Notice title; required.
    #[serde(default)]
    pub title: Option<String>,
    /// Notice body.
    #[serde(default)]
    pub description: Option<String>,
    /// Importance marker, e.g. `high`.
    #[serde(default)]
    pub importance: Option<String>,
    /// Notice category, e.g. `maintenance`.
    #[serde(default)]
    pub kind: Option<String>,
}

/// A notice as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementDto {
    /// Row ID.
    pub id: i64,
    /// Notice title.
    pub title: String,
    /// Notice body.
    pub description: String,
    /// Importance marker.
    pub importance: String,
    /// Notice category.
    pub kind: String,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<AnnouncementRecord> for AnnouncementDto {
    fn from(record: AnnouncementRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            importance: record.importance,
            kind: record.kind,
            created_at: record.created_at,
        }
    }
}
