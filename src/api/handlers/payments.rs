//! Billing handlers: payment-intent creation and the append-only
//! ledger.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateIntentRequest, CreateIntentResponse, EmailQuery, PaymentDto, RecordPaymentRequest,
};
use crate::app_state::AppState;
use crate::auth::Identity;
use crate::error::ApiError;

/// `POST /create-payment-intent` — Ask the gateway for a payment intent
/// covering one rent amount.
async fn create_payment_intent(
    State(state): State<AppState>,
    _identity: Identity,
    Json(req): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    let rent = req
        .rent
        .ok_or_else(|| ApiError::Validation("missing field: rent".to_string()))?;
    if rent <= 0 {
        return Err(ApiError::Validation("rent must be positive".to_string()));
    }
    let amount_minor = rent
        .checked_mul(100)
        .ok_or_else(|| ApiError::Validation("rent out of range".to_string()))?;

    let intent = state.gateway.create_intent(amount_minor).await?;
    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// `GET /payments?email=` — Ledger entries for one payer, most recent
/// first.
async fn list_payments(
    State(state): State<AppState>,
    _identity: Identity,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<PaymentDto>>, ApiError> {
    let email = query
        .email
        .ok_or_else(|| ApiError::Validation("missing query parameter: email".to_string()))?;

    let records = state.store.list_payments(&email).await?;
    Ok(Json(records.into_iter().map(PaymentDto::from).collect()))
}

/// `POST /payments` — Append one ledger entry. Entries are never
/// updated after insertion.
async fn record_payment(
    State(state): State<AppState>,
    _identity: Identity,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payer_email = req
        .payer_email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::Validation("missing field: payer_email".to_string()))?;
    let amount = req
        .amount
        .ok_or_else(|| ApiError::Validation("missing field: amount".to_string()))?;

    let record = state.store.insert_payment(&payer_email, amount).await?;
    Ok((StatusCode::CREATED, Json(PaymentDto::from(record))))
}

/// Billing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments).post(record_payment))
        .route("/create-payment-intent", post(create_payment_intent))
}
