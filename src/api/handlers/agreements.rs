//! Agreement handlers: submission, owner listings, the member view,
//! and the admin accept/reject decisions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{
    AcceptRequest, AcceptResponse, AgreementDto, EmailQuery, SubmitAgreementRequest, UpdateReport,
};
use crate::app_state::AppState;
use crate::auth::{AdminIdentity, Identity};
use crate::domain::NewAgreement;
use crate::error::ApiError;

/// `POST /agreements` — Submit an application for an apartment.
///
/// The caller must own the submission; a second agreement for the same
/// email conflicts.
async fn submit_agreement(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Json(req): Json<SubmitAgreementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = NewAgreement::from_parts(
        req.user_email,
        req.block,
        req.floor,
        req.apartment_no,
        req.rent,
    )?;

    let record = state.lifecycle.submit(&identity.email, submission).await?;
    Ok((StatusCode::CREATED, Json(AgreementDto::from(record))))
}

/// `GET /agreements?email=` — Agreements owned by the given email.
async fn list_agreements(
    State(state): State<AppState>,
    _identity: Identity,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<AgreementDto>>, ApiError> {
    let email = query
        .email
        .ok_or_else(|| ApiError::Validation("missing query parameter: email".to_string()))?;

    let records = state.lifecycle.list_for_user(&email).await?;
    Ok(Json(records.into_iter().map(AgreementDto::from).collect()))
}

/// `GET /member-agreements?email=` — The caller's agreement, gated on
/// the stored role being exactly `member`.
async fn member_agreement(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Query(query): Query<EmailQuery>,
) -> Result<Json<AgreementDto>, ApiError> {
    let email = query
        .email
        .ok_or_else(|| ApiError::Validation("missing query parameter: email".to_string()))?;
    if email != identity.email {
        return Err(ApiError::Forbidden(
            "agreements are visible to their owner only".to_string(),
        ));
    }

    let record = state.lifecycle.member_agreement(&email).await?;
    Ok(Json(AgreementDto::from(record)))
}

/// `PATCH /agreements/{id}/accept` — Accept the application and promote
/// the named user to `member`.
async fn accept_agreement(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(id): Path<Uuid>,
    Json(req): Json<AcceptRequest>,
) -> Result<Json<AcceptResponse>, ApiError> {
    let email = req
        .email
        .ok_or_else(|| ApiError::Validation("missing field: email".to_string()))?;

    let outcome = state.lifecycle.accept(id, &email).await?;
    Ok(Json(AcceptResponse::from(outcome)))
}

/// `PATCH /agreements/{id}/reject` — Reject the application. No role
/// change.
async fn reject_agreement(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<UpdateReport>, ApiError> {
    let affected = state.lifecycle.reject(id).await?;
    Ok(Json(UpdateReport { affected }))
}

/// Agreement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agreements", get(list_agreements).post(submit_agreement))
        .route("/agreements/{id}/accept", patch(accept_agreement))
        .route("/agreements/{id}/reject", patch(reject_agreement))
        .route("/member-agreements", get(member_agreement))
}
