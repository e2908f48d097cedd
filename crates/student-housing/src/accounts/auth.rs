use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{Credentials, UserProfile};
use super::identity::{AuthError, IdentityProvider};
use super::repository::ProfileRepository;
use super::service::{AccountService, AccountServiceError};
use super::session::{AuthSession, SessionRegistry, SessionToken};
use super::validation::{CredentialPolicy, ValidationError};

/// Sign-up, sign-in and sign-out flows tying the identity provider to profiles and sessions.
pub struct AuthService<I, R> {
    identity: Arc<I>,
    accounts: AccountService<R>,
    credentials: CredentialPolicy,
    sessions: Arc<SessionRegistry>,
}

impl<I, R> AuthService<I, R>
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    pub fn new(
        identity: Arc<I>,
        accounts: AccountService<R>,
        credentials: CredentialPolicy,
        sessions: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            identity,
            accounts,
            credentials,
            sessions,
        }
    }

    pub fn accounts(&self) -> &AccountService<R> {
        &self.accounts
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    /// Create the account and its pending profile, then sign the user in.
    pub async fn sign_up(
        &self,
        credentials: Credentials,
    ) -> Result<(AuthSession, UserProfile), AuthFlowError> {
        self.credentials.check_sign_up(&credentials)?;

        let email = credentials.email.trim();
        let uid = self.identity.sign_up(email, &credentials.password).await?;
        let profile = self.accounts.create_profile(uid.clone(), email)?;
        let session = self.sessions.issue(uid);
        Ok((session, profile))
    }

    pub async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession, AuthFlowError> {
        self.credentials.check_sign_in(&credentials)?;

        let uid = self
            .identity
            .sign_in(credentials.email.trim(), &credentials.password)
            .await
            .map_err(|error| {
                warn!(error = %error, "sign-in rejected");
                error
            })?;
        info!(uid = %uid.0, "signed in");
        Ok(self.sessions.issue(uid))
    }

    /// Revoke the session if it is still live. Signing out twice is not an error.
    pub fn sign_out(&self, token: &SessionToken) {
        if let Some(uid) = self.sessions.revoke(token) {
            info!(uid = %uid.0, "signed out");
        }
    }
}

/// Error raised by the authentication flows.
#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Account(#[from] AccountServiceError),
}
