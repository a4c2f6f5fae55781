//! Persistence layer: PostgreSQL tables behind an explicitly owned
//! store handle.
//!
//! The gate and the lifecycle manager reach storage through the traits
//! in [`repository`]; everything else uses [`postgres::PgStore`]
//! directly. Schema lives in `migrations/` and is applied at startup.

pub mod models;
pub mod postgres;
pub mod repository;

pub use postgres::PgStore;
pub use repository::{AcceptOutcome, AgreementStore, RoleStore};
