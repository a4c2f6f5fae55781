//! Authorization gate and identity verification.
//!
//! Identity verification ("is this caller who they claim") and role
//! authorization ("is this caller allowed to do X") are separate steps
//! that fail independently; see [`gate::AuthGate`].

pub mod gate;
pub mod verifier;

pub use gate::{AdminIdentity, AuthGate, Identity};
pub use verifier::{IdentityVerifier, JwtVerifier, VerifiedIdentity};
