//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};

/// `?email=` query parameter shared by the owner-scoped listings.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailQuery {
    /// Email the listing is scoped to.
    #[serde(default)]
    pub email: Option<String>,
}

/// Affected-row report for update endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateReport {
    /// Number of rows the update matched. Zero means the filter matched
    /// nothing; that is a no-op, not an error.
    pub affected: u64,
}
