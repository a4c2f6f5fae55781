//! # dwello
//!
//! Property-management backend: tenancy records, rental-agreement
//! workflows, billing, and promotional coupons behind an HTTP API
//! backed by PostgreSQL.
//!
//! Every request passes the authorization gate (identity verification
//! plus role lookup) before it reaches business logic; the agreement
//! lifecycle manager is the only component that advances user roles.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── AuthGate (auth/)        ── IdentityVerifier + RoleStore
//!     ├── AgreementLifecycle (service/)
//!     ├── PaymentGateway (service/billing)
//!     │
//!     └── PgStore (persistence/)  ── PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
