//! The authorization gate: every request's path into business logic.
//!
//! [`AuthGate::authorize`] runs three steps — credential presence,
//! provider verification, role lookup — and each step can fail
//! independently:
//!
//! 1. missing or non-`Bearer` header ⇒ `Unauthorized`, without calling
//!    the identity provider;
//! 2. provider rejection (expired, malformed, bad signature) ⇒
//!    `Forbidden`;
//! 3. when a role is required, a missing user record or a role mismatch
//!    ⇒ `Forbidden: <role> only`.
//!
//! The gate is read-only. Handlers consume it through the [`Identity`]
//! and [`AdminIdentity`] extractors.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;

use super::verifier::{IdentityVerifier, VerifiedIdentity};
use crate::app_state::AppState;
use crate::domain::Role;
use crate::error::ApiError;
use crate::persistence::RoleStore;

/// Composes the identity verifier with the role store.
#[derive(Debug)]
pub struct AuthGate {
    verifier: Arc<dyn IdentityVerifier>,
    roles: Arc<dyn RoleStore>,
}

impl AuthGate {
    /// Creates a gate over the given verifier and role store.
    #[must_use]
    pub fn new(verifier: Arc<dyn IdentityVerifier>, roles: Arc<dyn RoleStore>) -> Self {
        Self { verifier, roles }
    }

    /// Authorizes a request from its raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when no bearer credential is
    /// present, [`ApiError::Forbidden`] when verification fails or the
    /// stored role does not satisfy `required`, and
    /// [`ApiError::Persistence`] when the role lookup itself fails
    /// (fail closed).
    pub async fn authorize(
        &self,
        header: Option<&str>,
        required: Option<Role>,
    ) -> Result<VerifiedIdentity, ApiError> {
        let Some(header) = header else {
            return Err(ApiError::Unauthorized(
                "missing authorization header".to_string(),
            ));
        };
        let Some(token) = header.strip_prefix("Bearer ") else {
            return Err(ApiError::Unauthorized(
                "authorization header is not a bearer credential".to_string(),
            ));
        };

        let identity = self.verifier.verify(token).await.map_err(|err| {
            tracing::debug!(%err, "credential verification failed");
            ApiError::Forbidden("invalid or expired credential".to_string())
        })?;

        if let Some(required) = required {
            let stored = self.roles.role_of(&identity.email).await?;
            if stored != Some(required) {
                return Err(ApiError::Forbidden(format!("{required} only")));
            }
        }

        Ok(identity)
    }
}

/// Extractor for any verified caller (gate steps 1–2).
#[derive(Debug, Clone)]
pub struct Identity(pub VerifiedIdentity);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let identity = state.gate.authorize(header, None).await?;
        Ok(Self(identity))
    }
}

/// Extractor for a verified caller whose stored role is `admin`
/// (gate steps 1–3).
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub VerifiedIdentity);

impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let identity = state.gate.authorize(header, Some(Role::Admin)).await?;
        Ok(Self(identity))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use axum::http::StatusCode;

    use super::*;
    use crate::auth::verifier::VerifyError;

    /// Verifier that vouches for exactly one token.
    #[derive(Debug)]
    struct SingleTokenVerifier {
        token: &'static str,
        email: &'static str,
    }

    #[async_trait]
    impl IdentityVerifier for SingleTokenVerifier {
        async fn verify(&self, token: &str) -> Result<VerifiedIdentity, VerifyError> {
            if token == self.token {
                Ok(VerifiedIdentity {
                    subject: "sub-1".to_string(),
                    email: self.email.to_string(),
                })
            } else {
                Err(VerifyError::Rejected("unknown token".to_string()))
            }
        }
    }

    #[derive(Debug, Default)]
    struct MapRoleStore {
        roles: HashMap<String, Role>,
    }

    #[async_trait]
    impl RoleStore for MapRoleStore {
        async fn role_of(&self, email: &str) -> Result<Option<Role>, ApiError> {
            Ok(self.roles.get(email).copied())
        }
    }

    fn gate_with(email: &'static str, role: Option<Role>) -> AuthGate {
        let verifier = SingleTokenVerifier {
            token: "good-token",
            email,
        };
        let mut roles = MapRoleStore::default();
        if let Some(role) = role {
            roles.roles.insert(email.to_string(), role);
        }
        AuthGate::new(Arc::new(verifier), Arc::new(roles))
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized_without_verifier_call() {
        let gate = gate_with("admin@example.com", Some(Role::Admin));
        let Err(err) = gate.authorize(None, Some(Role::Admin)).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_header_is_unauthorized() {
        let gate = gate_with("admin@example.com", Some(Role::Admin));
        let Err(err) = gate.authorize(Some("Basic abc123"), None).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejected_credential_is_forbidden() {
        let gate = gate_with("admin@example.com", Some(Role::Admin));
        let Err(err) = gate.authorize(Some("Bearer forged"), None).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn verified_caller_passes_without_role_requirement() {
        let gate = gate_with("resident@example.com", None);
        let result = gate.authorize(Some("Bearer good-token"), None).await;
        let Ok(identity) = result else {
            panic!("expected authorization");
        };
        assert_eq!(identity.email, "resident@example.com");
    }

    #[tokio::test]
    async fn non_admin_role_is_forbidden_on_admin_routes() {
        let gate = gate_with("resident@example.com", Some(Role::Member));
        let Err(err) = gate
            .authorize(Some("Bearer good-token"), Some(Role::Admin))
            .await
        else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("admin only"));
    }

    #[tokio::test]
    async fn unknown_user_is_forbidden_on_admin_routes() {
        let gate = gate_with("stranger@example.com", None);
        let Err(err) = gate
            .authorize(Some("Bearer good-token"), Some(Role::Admin))
            .await
        else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_passes_the_admin_gate() {
        let gate = gate_with("admin@example.com", Some(Role::Admin));
        let result = gate
            .authorize(Some("Bearer good-token"), Some(Role::Admin))
            .await;
        assert!(result.is_ok());
    }
}
