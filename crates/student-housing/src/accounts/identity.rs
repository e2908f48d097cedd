use async_trait::async_trait;

use super::domain::AccountId;

/// External email/password identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account, failing if the email is already registered.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AccountId, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AccountId, AuthError>;
}

/// Authentication failures surfaced next to the form. Not retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("An account with this email already exists.")]
    DuplicateAccount,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
