//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; system routes
//! live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Aggregated OpenAPI document for the annotated endpoints.
#[cfg(feature = "swagger-ui")]
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        handlers::system::health_handler,
        handlers::apartments::list_apartments,
        handlers::coupons::list_coupons,
        handlers::coupons::validate_coupon,
    ),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Catalog", description = "Apartment catalog"),
        (name = "Coupons", description = "Promotional coupons"),
    )
)]
struct ApiDoc;

/// Swagger UI router serving the OpenAPI document.
#[cfg(feature = "swagger-ui")]
pub fn docs_router() -> Router<AppState> {
    use utoipa::OpenApi as _;

    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}
