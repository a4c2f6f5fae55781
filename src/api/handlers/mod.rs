//! REST endpoint handlers organized by resource.

pub mod agreements;
pub mod announcements;
pub mod apartments;
pub mod coupons;
pub mod payments;
pub mod system;
pub mod users;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(apartments::routes())
        .merge(agreements::routes())
        .merge(announcements::routes())
        .merge(payments::routes())
        .merge(coupons::routes())
}
