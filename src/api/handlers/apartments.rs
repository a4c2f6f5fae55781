//! Apartment catalog handler: public filtered + paginated listing.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{ApartmentDto, ApartmentListResponse, ApartmentQuery};
use crate::app_state::AppState;
use crate::domain::pagination::{self, PageRequest};
use crate::error::ApiError;

/// `GET /apartments` — One catalog page, filtered by rent bounds.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/apartments",
    tag = "Catalog",
    summary = "List apartments",
    description = "Returns one fixed-size page of the apartment catalog, filtered by optional rent bounds. The page count reflects the filtered set.",
    params(ApartmentQuery),
    responses(
        (status = 200, description = "One catalog page", body = ApartmentListResponse),
    )
)]
pub async fn list_apartments(
    State(state): State<AppState>,
    Query(query): Query<ApartmentQuery>,
) -> Result<Json<ApartmentListResponse>, ApiError> {
    let page = PageRequest::new(query.page);
    let (rows, total) = state
        .store
        .list_apartments(page, query.min_rent, query.max_rent)
        .await?;

    Ok(Json(ApartmentListResponse {
        apartments: rows.into_iter().map(ApartmentDto::from).collect(),
        current_page: page.page,
        total_pages: pagination::total_pages(total),
    }))
}

/// Catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/apartments", get(list_apartments))
}
