//! Accounts: credential checks, profiles, the approval gate and explicit sessions.

pub mod auth;
pub mod domain;
pub mod gate;
pub mod identity;
pub mod middleware;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;
pub mod validation;

#[cfg(test)]
pub(crate) mod tests;

pub use auth::{AuthFlowError, AuthService};
pub use domain::{
    AccountId, ApprovalDecision, ApprovalStatus, Credentials, RegistrationDetails, UserProfile,
    UserRole,
};
pub use gate::{AccessPolicy, AccessState, StatusBanner};
pub use identity::{AuthError, IdentityProvider};
pub use middleware::{
    is_public_path, require_browse_access, require_session, sign_in_location,
};
pub use repository::{ProfileRepository, RepositoryError};
pub use router::account_router;
pub use service::{AccountService, AccountServiceError};
pub use session::{AuthSession, SessionEvent, SessionRegistry, SessionToken, SESSION_COOKIE};
pub use validation::{CredentialPolicy, ValidationError, MIN_PASSWORD_LENGTH};
