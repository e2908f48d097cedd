use chrono::{DateTime, Utc};

use super::domain::{AccountId, ApprovalStatus, UserProfile};

/// Storage abstraction over the `users` collection.
pub trait ProfileRepository: Send + Sync {
    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError>;
    fn update(&self, profile: UserProfile) -> Result<(), RepositoryError>;
    fn fetch(&self, uid: &AccountId) -> Result<Option<UserProfile>, RepositoryError>;
    /// Profiles with the given status, newest first.
    fn by_status(&self, status: ApprovalStatus) -> Result<Vec<UserProfile>, RepositoryError>;
    /// Atomically move a profile from `from` to `to`. Fails with `StatusChanged` when the stored
    /// status is no longer `from`, leaving the profile untouched.
    fn transition(
        &self,
        uid: &AccountId,
        from: ApprovalStatus,
        to: ApprovalStatus,
        at: DateTime<Utc>,
    ) -> Result<UserProfile, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("profile already exists")]
    Conflict,
    #[error("profile not found")]
    NotFound,
    #[error("profile is already {}", current.label())]
    StatusChanged { current: ApprovalStatus },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
