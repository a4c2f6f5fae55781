//! Coupon handlers: public catalog, validation, and admin creation.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{CouponDto, CreateCouponRequest, ValidateCouponQuery};
use crate::app_state::AppState;
use crate::auth::{AdminIdentity, Identity};
use crate::domain::coupon::{self, CouponVerdict};
use crate::error::ApiError;

/// `GET /coupons` — All stored coupons.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/coupons",
    tag = "Coupons",
    summary = "List coupons",
    description = "Returns every stored coupon, soonest expiry first.",
    responses(
        (status = 200, description = "Coupon list", body = Vec<CouponDto>),
    )
)]
pub async fn list_coupons(State(state): State<AppState>) -> Result<Json<Vec<CouponDto>>, ApiError> {
    let records = state.store.list_coupons().await?;
    Ok(Json(records.into_iter().map(CouponDto::from).collect()))
}

/// `GET /validate-coupon?code=` — Validate a coupon code against the
/// wall clock.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when `code` is missing.
#[utoipa::path(
    get,
    path = "/api/v1/validate-coupon",
    tag = "Coupons",
    summary = "Validate a coupon code",
    description = "Re-evaluates the stored expiry against the current time on every call. Unknown and expired codes are reported as invalid with a reason, not as errors.",
    params(ValidateCouponQuery),
    responses(
        (status = 200, description = "Validation verdict", body = serde_json::Value),
        (status = 400, description = "Missing code", body = serde_json::Value),
    )
)]
pub async fn validate_coupon(
    State(state): State<AppState>,
    _identity: Identity,
    Query(query): Query<ValidateCouponQuery>,
) -> Result<Json<CouponVerdict>, ApiError> {
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("missing query parameter: code".to_string()))?;

    let verdict = match state.store.find_coupon(&code).await? {
        Some(record) => coupon::evaluate(record.expires_at, record.discount_pct, Utc::now()),
        None => CouponVerdict::not_found(),
    };

    Ok(Json(verdict))
}

/// `POST /coupons` — Create a coupon. Coupons are immutable once
/// created.
async fn create_coupon(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Json(req): Json<CreateCouponRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let code = req
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("missing field: code".to_string()))?;
    let discount_pct = req
        .discount_pct
        .ok_or_else(|| ApiError::Validation("missing field: discount_pct".to_string()))?;
    let expires_at = req
        .expires_at
        .ok_or_else(|| ApiError::Validation("missing field: expires_at".to_string()))?;

    let record = state
        .store
        .insert_coupon(
            &code,
            discount_pct,
            expires_at,
            req.description.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CouponDto::from(record))))
}

/// Coupon routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/coupons", get(list_coupons).post(create_coupon))
        .route("/validate-coupon", get(validate_coupon))
}
