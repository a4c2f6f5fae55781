//! Apartment catalog DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::persistence::models::ApartmentRecord;

/// Query parameters for `GET /apartments`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApartmentQuery {
    /// 1-indexed page number. Defaults to 1.
    #[serde(default)]
    pub page: Option<i64>,
    /// Lower rent bound, inclusive. Defaults to 0.
    #[serde(default)]
    pub min_rent: Option<i64>,
    /// Upper rent bound, inclusive. Defaults to unbounded.
    #[serde(default)]
    pub max_rent: Option<i64>,
}

/// A catalog entry as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApartmentDto {
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

impl From<ApartmentRecord> for ApartmentDto {
    fn from(record: ApartmentRecord) -> Self {
        Self {
            id: record.id,
            block: record.block,
            floor: record.floor,
            apartment_no: record.apartment_no,
            rent: record.rent,
            image_url: record.image_url,
        }
    }
}

/// Paginated response for `GET /apartments`.
///
/// `total_pages` is computed from the count of the *filtered* set, not
/// the full catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApartmentListResponse {
    /// One page of catalog entries.
    pub apartments: Vec<ApartmentDto>,
    /// The page this response covers (1-indexed).
    pub current_page: i64,
    /// Total page count for the filtered set.
    pub total_pages: i64,
}
