//! Shared application state injected into all Axum handlers.
//!
//! Every collaborator is explicitly constructed at startup and owned
//! here; nothing is process-global.

use std::sync::Arc;

use crate::auth::AuthGate;
use crate::persistence::PgStore;
use crate::service::{AgreementLifecycle, PaymentGateway};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Storage handle for plain collection reads and writes.
    pub store: Arc<PgStore>,
    /// Authorization gate consulted by the identity extractors.
    pub gate: Arc<AuthGate>,
    /// Agreement/role lifecycle manager.
    pub lifecycle: Arc<AgreementLifecycle>,
    /// Payment gateway bridge.
    pub gateway: Arc<dyn PaymentGateway>,
}
