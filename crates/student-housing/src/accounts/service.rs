use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    AccountId, ApprovalDecision, ApprovalStatus, RegistrationDetails, UserProfile,
};
use super::gate::{AccessPolicy, AccessState};
use super::repository::{ProfileRepository, RepositoryError};
use super::validation::{normalize_registration, ValidationError};

/// Service owning profile lifecycle and the administrator approval workflow.
pub struct AccountService<R> {
    repository: Arc<R>,
    policy: AccessPolicy,
}

impl<R> Clone for AccountService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            policy: self.policy,
        }
    }
}

impl<R> AccountService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: AccessPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Write the pending student profile for a freshly created account.
    pub fn create_profile(
        &self,
        uid: AccountId,
        email: &str,
    ) -> Result<UserProfile, AccountServiceError> {
        let profile = UserProfile::new_pending(uid, email.trim(), Utc::now());
        let stored = self.repository.insert(profile)?;
        info!(uid = %stored.uid.0, "profile created pending approval");
        Ok(stored)
    }

    /// Record the one-time contact details. Approval status is left untouched.
    pub fn complete_registration(
        &self,
        uid: &AccountId,
        details: RegistrationDetails,
    ) -> Result<UserProfile, AccountServiceError> {
        let details = normalize_registration(details)?;
        let mut profile = self.profile(uid)?;
        if profile.registration_complete {
            return Err(AccountServiceError::RegistrationAlreadyComplete);
        }

        profile.display_name = details.display_name;
        profile.student_number = details.student_number;
        profile.phone = details.phone;
        profile.registration_complete = true;
        profile.updated_at = Utc::now();

        self.repository.update(profile.clone())?;
        Ok(profile)
    }

    pub fn profile(&self, uid: &AccountId) -> Result<UserProfile, AccountServiceError> {
        let profile = self
            .repository
            .fetch(uid)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(profile)
    }

    /// Access state for a possibly anonymous visitor. A signed-in account without a
    /// profile document is treated as unauthenticated.
    pub fn access_state(&self, uid: Option<&AccountId>) -> Result<AccessState, AccountServiceError> {
        let Some(uid) = uid else {
            return Ok(AccessState::Unauthenticated);
        };
        let profile = self.repository.fetch(uid)?;
        Ok(AccessState::from_profile(profile.as_ref()))
    }

    /// Users in the given status, newest first. Administrators only.
    pub fn users_by_status(
        &self,
        actor: &AccountId,
        status: ApprovalStatus,
    ) -> Result<Vec<UserProfile>, AccountServiceError> {
        self.require_admin(actor)?;
        Ok(self.repository.by_status(status)?)
    }

    /// Approve or reject a pending user. A decided user never changes status again.
    pub fn decide(
        &self,
        actor: &AccountId,
        uid: &AccountId,
        decision: ApprovalDecision,
    ) -> Result<UserProfile, AccountServiceError> {
        self.require_admin(actor)?;

        let outcome = self.repository.transition(
            uid,
            ApprovalStatus::Pending,
            decision.into(),
            Utc::now(),
        );
        let profile = match outcome {
            Ok(profile) => profile,
            Err(RepositoryError::StatusChanged { current }) => {
                warn!(
                    uid = %uid.0,
                    status = current.label(),
                    "ignoring decision for already decided user"
                );
                return Err(AccountServiceError::InvalidTransition { from: current });
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            actor = %actor.0,
            uid = %uid.0,
            status = profile.approval_status.label(),
            "approval decision recorded"
        );
        Ok(profile)
    }

    fn require_admin(&self, actor: &AccountId) -> Result<(), AccountServiceError> {
        let state = self.access_state(Some(actor))?;
        if self.policy.can_administer(state) {
            Ok(())
        } else {
            Err(AccountServiceError::Forbidden)
        }
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("administrator access required")]
    Forbidden,
    #[error("user is already {}", from.label())]
    InvalidTransition { from: ApprovalStatus },
    #[error("registration has already been completed")]
    RegistrationAlreadyComplete,
}
