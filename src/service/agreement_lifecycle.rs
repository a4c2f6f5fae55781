//! Agreement lifecycle manager: the state machine coupling agreement
//! status to user role.
//!
//! `NoAgreement → Pending → Checked` — `Checked` is terminal on both
//! the accept and the reject branch. Acceptance is the only path that
//! advances a role, and only ever in the guest→member direction; this
//! component is the sole writer of roles besides the explicit admin
//! override.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewAgreement, Role};
use crate::error::ApiError;
use crate::persistence::models::AgreementRecord;
use crate::persistence::repository::{AcceptOutcome, AgreementStore, RoleStore};

/// Orchestrates agreement submission and the admin decision branches.
///
/// Stateless coordinator over the injected stores. Every mutation
/// follows the pattern: validate → write through the store seam →
/// trace → return the raw outcome to the caller.
#[derive(Debug, Clone)]
pub struct AgreementLifecycle {
    agreements: Arc<dyn AgreementStore>,
    roles: Arc<dyn RoleStore>,
}

impl AgreementLifecycle {
    /// Creates a new lifecycle manager over the given stores.
    #[must_use]
    pub fn new(agreements: Arc<dyn AgreementStore>, roles: Arc<dyn RoleStore>) -> Self {
        Self { agreements, roles }
    }

    /// Submits an application: inserts a pending agreement owned by the
    /// caller. No role change happens at this point.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the caller is not the owner
    /// of the submission, [`ApiError::Conflict`] when the owner already
    /// holds an agreement (also under concurrent submits — the unique
    /// index is authoritative), and [`ApiError::Persistence`] on
    /// storage failure.
    pub async fn submit(
        &self,
        caller_email: &str,
        submission: NewAgreement,
    ) -> Result<AgreementRecord, ApiError> {
        if submission.user_email != caller_email {
            return Err(ApiError::Forbidden(
                "agreements can only be submitted for your own account".to_string(),
            ));
        }

        // Friendly-message pre-check; the unique index closes the race.
        let existing = self.agreements.find_for_user(&submission.user_email).await?;
        if !existing.is_empty() {
            return Err(ApiError::Conflict(
                "user already has an agreement".to_string(),
            ));
        }

        let record = self.agreements.insert(&submission).await?;
        tracing::info!(
            agreement = %record.id,
            user = %record.user_email,
            "agreement submitted"
        );
        Ok(record)
    }

    /// Accept branch: marks the agreement `checked` and advances the
    /// named user to `member`, atomically.
    ///
    /// The caller-supplied email must match the agreement's owning
    /// email. When the ID resolves to no agreement, the call reports
    /// zero affected rows on both sides and performs no role change —
    /// a no-op success, never a crash.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when `user_email` does not
    /// match the agreement's owner, [`ApiError::Persistence`] on
    /// storage failure (both writes roll back together).
    pub async fn accept(&self, id: Uuid, user_email: &str) -> Result<AcceptOutcome, ApiError> {
        let Some(agreement) = self.agreements.find_by_id(id).await? else {
            tracing::warn!(agreement = %id, "accept on unknown agreement id");
            return Ok(AcceptOutcome {
                agreement_updated: 0,
                user_updated: 0,
            });
        };

        if agreement.user_email != user_email {
            return Err(ApiError::Validation(
                "email does not match the agreement's owner".to_string(),
            ));
        }

        let outcome = self.agreements.accept(id, user_email).await?;
        tracing::info!(
            agreement = %id,
            user = user_email,
            user_updated = outcome.user_updated,
            "agreement accepted"
        );
        Ok(outcome)
    }

    /// Reject branch: marks the agreement `checked`. No role mutation,
    /// whatever the owner's prior role. Returns the affected-row count
    /// (zero when the ID matched nothing).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn reject(&self, id: Uuid) -> Result<u64, ApiError> {
        let affected = self.agreements.mark_checked(id).await?;
        tracing::info!(agreement = %id, affected, "agreement rejected");
        Ok(affected)
    }

    /// All agreements owned by `email`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Persistence`] on storage failure.
    pub async fn list_for_user(&self, email: &str) -> Result<Vec<AgreementRecord>, ApiError> {
        self.agreements.find_for_user(email).await
    }

    /// The member view: re-checks that the stored role is exactly
    /// `member` before returning the agreement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for any stored role other than
    /// `member` (including no user record at all),
    /// [`ApiError::NotFound`] when the member holds no agreement, and
    /// [`ApiError::Persistence`] on storage failure.
    pub async fn member_agreement(&self, email: &str) -> Result<AgreementRecord, ApiError> {
        let role = self.roles.role_of(email).await?;
        if role != Some(Role::Member) {
            return Err(ApiError::Forbidden("member only".to_string()));
        }

        self.agreements
            .find_for_user(email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("no agreement for this member".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use chrono::Utc;

    use super::*;
    use crate::domain::ApartmentRef;

    /// In-memory stand-in for both store seams, mirroring the
    /// PostgreSQL semantics: unique owner email, zero-affected updates
    /// on missing rows, guarded promotion.
    #[derive(Debug, Default)]
    struct FakeStore {
        agreements: Mutex<Vec<AgreementRecord>>,
        roles: Mutex<HashMap<String, Role>>,
    }

    impl FakeStore {
        fn with_role(self, email: &str, role: Role) -> Self {
            if let Ok(mut roles) = self.roles.lock() {
                roles.insert(email.to_string(), role);
            }
            self
        }

        fn role(&self, email: &str) -> Option<Role> {
            self.roles.lock().ok().and_then(|r| r.get(email).copied())
        }

        fn status_of(&self, id: Uuid) -> Option<String> {
            self.agreements
                .lock()
                .ok()
                .and_then(|a| a.iter().find(|r| r.id == id).map(|r| r.status.clone()))
        }
    }

    #[async_trait]
    impl RoleStore for FakeStore {
        async fn role_of(&self, email: &str) -> Result<Option<Role>, ApiError> {
            Ok(self.role(email))
        }
    }

    #[async_trait]
    impl AgreementStore for FakeStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<AgreementRecord>, ApiError> {
            let agreements = self
                .agreements
                .lock()
                .map_err(|_| ApiError::Internal("lock poisoned".to_string()))?;
            Ok(agreements.iter().find(|r| r.id == id).cloned())
        }

        async fn find_for_user(&self, email: &str) -> Result<Vec<AgreementRecord>, ApiError> {
            let agreements = self
                .agreements
                .lock()
                .map_err(|_| ApiError::Internal("lock poisoned".to_string()))?;
            Ok(agreements
                .iter()
                .filter(|r| r.user_email == email)
                .cloned()
                .collect())
        }

        async fn insert(&self, submission: &NewAgreement) -> Result<AgreementRecord, ApiError> {
            let mut agreements = self
                .agreements
                .lock()
                .map_err(|_| ApiError::Internal("lock poisoned".to_string()))?;
            if agreements
                .iter()
                .any(|r| r.user_email == submission.user_email)
            {
                return Err(ApiError::Conflict(
                    "user already has an agreement".to_string(),
                ));
            }
            let record = AgreementRecord {
                id: Uuid::new_v4(),
                user_email: submission.user_email.clone(),
                block: submission.apartment.block.clone(),
                floor: submission.apartment.floor,
                apartment_no: submission.apartment.apartment_no,
                rent: submission.rent,
                status: "pending".to_string(),
                created_at: Utc::now(),
            };
            agreements.push(record.clone());
            Ok(record)
        }

        async fn accept(&self, id: Uuid, user_email: &str) -> Result<AcceptOutcome, ApiError> {
            let mut agreements = self
                .agreements
                .lock()
                .map_err(|_| ApiError::Internal("lock poisoned".to_string()))?;
            let agreement_updated = match agreements.iter_mut().find(|r| r.id == id) {
                Some(record) => {
                    record.status = "checked".to_string();
                    1
                }
                None => 0,
            };

            let mut roles = self
                .roles
                .lock()
                .map_err(|_| ApiError::Internal("lock poisoned".to_string()))?;
            let user_updated = match roles.get_mut(user_email) {
                Some(role) if *role != Role::Admin => {
                    *role = Role::Member;
                    1
                }
                _ => 0,
            };

            Ok(AcceptOutcome {
                agreement_updated,
                user_updated,
            })
        }

        async fn mark_checked(&self, id: Uuid) -> Result<u64, ApiError> {
            let mut agreements = self
                .agreements
                .lock()
                .map_err(|_| ApiError::Internal("lock poisoned".to_string()))?;
            match agreements.iter_mut().find(|r| r.id == id) {
                Some(record) => {
                    record.status = "checked".to_string();
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    const RESIDENT: &str = "resident@example.com";

    fn submission(email: &str) -> NewAgreement {
        NewAgreement {
            user_email: email.to_string(),
            apartment: ApartmentRef {
                block: "B".to_string(),
                floor: 4,
                apartment_no: 7,
            },
            rent: 1_200,
        }
    }

    fn lifecycle_over(store: Arc<FakeStore>) -> AgreementLifecycle {
        AgreementLifecycle::new(
            Arc::clone(&store) as Arc<dyn AgreementStore>,
            store as Arc<dyn RoleStore>,
        )
    }

    #[tokio::test]
    async fn submit_inserts_a_pending_agreement() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let result = lifecycle.submit(RESIDENT, submission(RESIDENT)).await;
        let Ok(record) = result else {
            panic!("expected submission to succeed");
        };
        assert_eq!(record.status, "pending");
        assert_eq!(record.user_email, RESIDENT);
        // Submission never touches the role.
        assert_eq!(store.role(RESIDENT), Some(Role::Guest));
    }

    #[tokio::test]
    async fn submit_for_someone_else_is_forbidden() {
        let store = Arc::new(FakeStore::default());
        let lifecycle = lifecycle_over(store);

        let Err(err) = lifecycle
            .submit("mallory@example.com", submission(RESIDENT))
            .await
        else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn second_submit_conflicts_and_stores_exactly_one() {
        let store = Arc::new(FakeStore::default());
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let first = lifecycle.submit(RESIDENT, submission(RESIDENT)).await;
        assert!(first.is_ok());

        let Err(err) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("expected conflict");
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let stored = store.agreements.lock().ok().map(|a| a.len());
        assert_eq!(stored, Some(1));
    }

    #[tokio::test]
    async fn accept_checks_the_agreement_and_promotes_the_user() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let Ok(record) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("submission failed");
        };

        let result = lifecycle.accept(record.id, RESIDENT).await;
        let Ok(outcome) = result else {
            panic!("expected accept to succeed");
        };
        assert_eq!(outcome.agreement_updated, 1);
        assert_eq!(outcome.user_updated, 1);
        assert_eq!(store.status_of(record.id).as_deref(), Some("checked"));
        assert_eq!(store.role(RESIDENT), Some(Role::Member));
    }

    #[tokio::test]
    async fn repeat_accept_stays_checked_and_reapplies_member_idempotently() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let Ok(record) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("submission failed");
        };
        let _ = lifecycle.accept(record.id, RESIDENT).await;

        let result = lifecycle.accept(record.id, RESIDENT).await;
        let Ok(outcome) = result else {
            panic!("expected repeat accept to be a no-op success");
        };
        assert_eq!(store.status_of(record.id).as_deref(), Some("checked"));
        assert_eq!(store.role(RESIDENT), Some(Role::Member));
        assert_eq!(outcome.user_updated, 1);
    }

    #[tokio::test]
    async fn accept_never_demotes_an_admin() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Admin));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let Ok(record) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("submission failed");
        };

        let result = lifecycle.accept(record.id, RESIDENT).await;
        let Ok(outcome) = result else {
            panic!("expected accept to succeed");
        };
        assert_eq!(outcome.user_updated, 0);
        assert_eq!(store.role(RESIDENT), Some(Role::Admin));
    }

    #[tokio::test]
    async fn accept_with_mismatched_email_is_a_validation_error() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let Ok(record) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("submission failed");
        };

        let Err(err) = lifecycle.accept(record.id, "other@example.com").await else {
            panic!("expected validation error");
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        // Nothing moved.
        assert_eq!(store.status_of(record.id).as_deref(), Some("pending"));
        assert_eq!(store.role(RESIDENT), Some(Role::Guest));
    }

    #[tokio::test]
    async fn accept_on_an_unknown_id_is_a_zero_affected_no_op() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let result = lifecycle.accept(Uuid::new_v4(), RESIDENT).await;
        let Ok(outcome) = result else {
            panic!("expected no-op success");
        };
        assert_eq!(outcome.agreement_updated, 0);
        assert_eq!(outcome.user_updated, 0);
        assert_eq!(store.role(RESIDENT), Some(Role::Guest));
    }

    #[tokio::test]
    async fn reject_checks_the_agreement_and_touches_no_role() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let Ok(record) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("submission failed");
        };

        let result = lifecycle.reject(record.id).await;
        assert_eq!(result.ok(), Some(1));
        assert_eq!(store.status_of(record.id).as_deref(), Some("checked"));
        assert_eq!(store.role(RESIDENT), Some(Role::Guest));
    }

    #[tokio::test]
    async fn reject_on_an_unknown_id_reports_zero() {
        let store = Arc::new(FakeStore::default());
        let lifecycle = lifecycle_over(store);

        let result = lifecycle.reject(Uuid::new_v4()).await;
        assert_eq!(result.ok(), Some(0));
    }

    #[tokio::test]
    async fn member_view_is_forbidden_for_non_members() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Guest));
        let lifecycle = lifecycle_over(store);

        let Err(err) = lifecycle.member_agreement(RESIDENT).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn member_view_is_not_found_without_an_agreement() {
        let store = Arc::new(FakeStore::default().with_role(RESIDENT, Role::Member));
        let lifecycle = lifecycle_over(store);

        let Err(err) = lifecycle.member_agreement(RESIDENT).await else {
            panic!("expected not-found");
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn member_view_returns_the_agreement() {
        let store = Arc::new(FakeStore::default());
        let lifecycle = lifecycle_over(Arc::clone(&store));

        let Ok(record) = lifecycle.submit(RESIDENT, submission(RESIDENT)).await else {
            panic!("submission failed");
        };
        let _ = lifecycle.accept(record.id, RESIDENT).await;

        // The fake had no user row to promote; seed the member role.
        if let Ok(mut roles) = store.roles.lock() {
            roles.insert(RESIDENT.to_string(), Role::Member);
        }

        let result = lifecycle.member_agreement(RESIDENT).await;
        let Ok(found) = result else {
            panic!("expected the agreement");
        };
        assert_eq!(found.id, record.id);
    }
}
