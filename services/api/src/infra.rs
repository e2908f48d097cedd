use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use student_housing::accounts::{
    AccountId, ApprovalStatus, AuthError, IdentityProvider, ProfileRepository, RepositoryError,
    UserProfile, UserRole,
};
use student_housing::config::ListingSourceConfig;
use student_housing::listings::{
    HttpDocumentCollection, ListingSource, RemoteListingSource, ResidenceRecord, SourceError,
    StaticCatalog,
};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listing source chosen by `APP_LISTING_SOURCE`.
pub(crate) enum ConfiguredSource {
    Static(StaticCatalog),
    Remote(RemoteListingSource<HttpDocumentCollection>),
}

impl ConfiguredSource {
    pub(crate) fn from_config(config: &ListingSourceConfig) -> Self {
        match config {
            ListingSourceConfig::Static => Self::Static(StaticCatalog::campus()),
            ListingSourceConfig::Remote { base_url } => Self::Remote(RemoteListingSource::new(
                HttpDocumentCollection::new(base_url.clone()),
            )),
        }
    }
}

#[async_trait]
impl ListingSource for ConfiguredSource {
    async fn fetch_available(&self) -> Result<Vec<ResidenceRecord>, SourceError> {
        match self {
            Self::Static(source) => source.fetch_available().await,
            Self::Remote(source) => source.fetch_available().await,
        }
    }

    fn source_name(&self) -> &'static str {
        match self {
            Self::Static(source) => source.source_name(),
            Self::Remote(source) => source.source_name(),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Arc<Mutex<HashMap<AccountId, UserProfile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        if guard.contains_key(&profile.uid) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.uid.clone(), profile.clone());
        Ok(profile)
    }

    fn update(&self, profile: UserProfile) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        if guard.contains_key(&profile.uid) {
            guard.insert(profile.uid.clone(), profile);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, uid: &AccountId) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(uid).cloned())
    }

    fn by_status(&self, status: ApprovalStatus) -> Result<Vec<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        let mut profiles: Vec<UserProfile> = guard
            .values()
            .filter(|profile| profile.approval_status == status)
            .cloned()
            .collect();
        profiles.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(profiles)
    }

    fn transition(
        &self,
        uid: &AccountId,
        from: ApprovalStatus,
        to: ApprovalStatus,
        at: DateTime<Utc>,
    ) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        let profile = guard.get_mut(uid).ok_or(RepositoryError::NotFound)?;
        if profile.approval_status != from {
            return Err(RepositoryError::StatusChanged {
                current: profile.approval_status,
            });
        }
        profile.approval_status = to;
        profile.updated_at = at;
        Ok(profile.clone())
    }
}

struct StoredAccount {
    uid: AccountId,
    password_digest: String,
}

/// Email/password accounts held in process memory. Passwords are stored as salted digests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryIdentityProvider {
    accounts: Arc<Mutex<HashMap<String, StoredAccount>>>,
}

fn password_digest(uid: &AccountId, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uid.0.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AccountId, AuthError> {
        let key = email.trim().to_ascii_lowercase();
        let mut guard = self.accounts.lock().expect("identity mutex poisoned");
        if guard.contains_key(&key) {
            return Err(AuthError::DuplicateAccount);
        }

        let uid = AccountId(uuid::Uuid::new_v4().simple().to_string());
        let password_digest = password_digest(&uid, password);
        guard.insert(
            key,
            StoredAccount {
                uid: uid.clone(),
                password_digest,
            },
        );
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AccountId, AuthError> {
        let key = email.trim().to_ascii_lowercase();
        let guard = self.accounts.lock().expect("identity mutex poisoned");
        match guard.get(&key) {
            Some(account) if account.password_digest == password_digest(&account.uid, password) => {
                Ok(account.uid.clone())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

/// Create the administrator account and its approved profile.
pub(crate) async fn seed_administrator(
    identity: &InMemoryIdentityProvider,
    profiles: &InMemoryProfileRepository,
    email: &str,
    password: &str,
) -> Result<AccountId, String> {
    let uid = identity
        .sign_up(email, password)
        .await
        .map_err(|err| err.to_string())?;

    let mut profile = UserProfile::new_pending(uid.clone(), email.trim(), Utc::now());
    profile.role = UserRole::Admin;
    profile.approval_status = ApprovalStatus::Approved;
    profiles.insert(profile).map_err(|err| err.to_string())?;

    info!(uid = %uid.0, "administrator account seeded");
    Ok(uid)
}
