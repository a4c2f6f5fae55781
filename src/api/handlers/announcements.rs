//! Announcement board handlers: append-only notices.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AnnouncementDto, CreateAnnouncementRequest};
use crate::app_state::AppState;
use crate::auth::{AdminIdentity, Identity};
use crate::error::ApiError;

/// `GET /announcements` — All notices, newest first.
async fn list_announcements(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<Vec<AnnouncementDto>>, ApiError> {
    let records = state.store.list_announcements().await?;
    Ok(Json(
        records.into_iter().map(AnnouncementDto::from).collect(),
    ))
}

/// `POST /announcements` — Publish a notice.
async fn create_announcement(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = req
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("missing field: title".to_string()))?;

    let record = state
        .store
        .insert_announcement(
            &title,
            req.description.as_deref().unwrap_or(""),
            req.importance.as_deref().unwrap_or("normal"),
            req.kind.as_deref().unwrap_or("notice"),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AnnouncementDto::from(record))))
}

/// Announcement routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/announcements",
        get(list_announcements).post(create_announcement),
    )
}
