//! User handlers: idempotent registration, lookup, and the direct
//! admin role edit.

use std::str::FromStr;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{EmailQuery, RegisterUserRequest, RoleEditRequest, UpdateReport, UserDto, UserQuery};
use crate::app_state::AppState;
use crate::auth::{AdminIdentity, Identity};
use crate::domain::Role;
use crate::error::ApiError;

/// `GET /users` — Look up users by optional email/role filters.
///
/// With `?email=` the response is the single matching record (or
/// `null`); without it, the filtered list.
async fn find_users(
    State(state): State<AppState>,
    _identity: Identity,
    Query(query): Query<UserQuery>,
) -> Result<Response, ApiError> {
    let users = state
        .store
        .find_users(query.email.as_deref(), query.role.as_deref())
        .await?;

    if query.email.is_some() {
        let single = users.into_iter().next().map(UserDto::from);
        Ok(Json(single).into_response())
    } else {
        let list: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
        Ok(Json(list).into_response())
    }
}

/// `POST /users` — Idempotent self-registration.
///
/// Creating an email that already exists returns the existing record
/// with `200 OK`; a fresh insert answers `201 Created`. The stored
/// record is never overwritten.
async fn register_user(
    State(state): State<AppState>,
    _identity: Identity,
    Json(req): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::Validation("missing field: email".to_string()))?;
    let name = req.name.unwrap_or_default();

    let (user, created) = state.store.register_user(&email, &name).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(UserDto::from(user))))
}

/// `PATCH /users?email=` — Direct admin role override.
///
/// The new role must belong to the closed set `{guest, member, admin}`.
async fn edit_role(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Query(query): Query<EmailQuery>,
    Json(req): Json<RoleEditRequest>,
) -> Result<Json<UpdateReport>, ApiError> {
    let email = query
        .email
        .ok_or_else(|| ApiError::Validation("missing query parameter: email".to_string()))?;
    let raw = req
        .role
        .ok_or_else(|| ApiError::Validation("missing field: role".to_string()))?;
    let role = Role::from_str(&raw)?;

    let affected = state.store.set_role(&email, role).await?;
    tracing::info!(user = %email, %role, affected, "role edited");
    Ok(Json(UpdateReport { affected }))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/users",
        get(find_users).post(register_user).patch(edit_role),
    )
}
