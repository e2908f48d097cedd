use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::accounts::auth::AuthService;
use crate::accounts::domain::{
    AccountId, ApprovalStatus, Credentials, RegistrationDetails, UserProfile, UserRole,
};
use crate::accounts::gate::AccessPolicy;
use crate::accounts::identity::{AuthError, IdentityProvider};
use crate::accounts::repository::{ProfileRepository, RepositoryError};
use crate::accounts::service::AccountService;
use crate::accounts::session::SessionRegistry;
use crate::accounts::validation::CredentialPolicy;

pub(crate) const ADMIN_UID: &str = "admin-1";

/// In-memory `users` collection.
#[derive(Default)]
pub(crate) struct MemoryProfiles {
    profiles: Mutex<HashMap<AccountId, UserProfile>>,
}

impl ProfileRepository for MemoryProfiles {
    fn insert(&self, profile: UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        if guard.contains_key(&profile.uid) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(profile.uid.clone(), profile.clone());
        Ok(profile)
    }

    fn update(&self, profile: UserProfile) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        match guard.get_mut(&profile.uid) {
            Some(existing) => {
                *existing = profile;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, uid: &AccountId) -> Result<Option<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(uid).cloned())
    }

    fn by_status(&self, status: ApprovalStatus) -> Result<Vec<UserProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        let mut matching: Vec<UserProfile> = guard
            .values()
            .filter(|profile| profile.approval_status == status)
            .cloned()
            .collect();
        matching.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(matching)
    }

    fn transition(
        &self,
        uid: &AccountId,
        from: ApprovalStatus,
        to: ApprovalStatus,
        at: DateTime<Utc>,
    ) -> Result<UserProfile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
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

/// Identity provider keeping email/password pairs in memory.
#[derive(Default)]
pub(crate) struct StubIdentity {
    accounts: Mutex<HashMap<String, (String, AccountId)>>,
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AccountId, AuthError> {
        let mut guard = self.accounts.lock().expect("identity mutex poisoned");
        let key = email.to_ascii_lowercase();
        if guard.contains_key(&key) {
            return Err(AuthError::DuplicateAccount);
        }
        let uid = AccountId(format!("uid-{}", guard.len() + 1));
        guard.insert(key, (password.to_string(), uid.clone()));
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AccountId, AuthError> {
        let guard = self.accounts.lock().expect("identity mutex poisoned");
        match guard.get(&email.to_ascii_lowercase()) {
            Some((stored, uid)) if stored == password => Ok(uid.clone()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}

pub(crate) fn profile_at(uid: &str, minutes_after_seed: i64) -> UserProfile {
    let seeded = Utc
        .with_ymd_and_hms(2026, 2, 6, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    UserProfile::new_pending(
        AccountId(uid.to_string()),
        format!("{uid}@uwo.ca"),
        seeded + Duration::minutes(minutes_after_seed),
    )
}

pub(crate) fn admin_profile() -> UserProfile {
    let mut profile = profile_at(ADMIN_UID, 0);
    profile.role = UserRole::Admin;
    profile.approval_status = ApprovalStatus::Approved;
    profile.registration_complete = true;
    profile
}

pub(crate) fn admin_id() -> AccountId {
    AccountId(ADMIN_UID.to_string())
}

/// Repository holding one administrator.
pub(crate) fn repository_with_admin() -> Arc<MemoryProfiles> {
    let repository = Arc::new(MemoryProfiles::default());
    repository
        .insert(admin_profile())
        .expect("admin seeded");
    repository
}

pub(crate) fn account_service(repository: Arc<MemoryProfiles>) -> AccountService<MemoryProfiles> {
    AccountService::new(repository, AccessPolicy::default())
}

pub(crate) fn auth_service(
    repository: Arc<MemoryProfiles>,
) -> Arc<AuthService<StubIdentity, MemoryProfiles>> {
    Arc::new(AuthService::new(
        Arc::new(StubIdentity::default()),
        account_service(repository),
        CredentialPolicy::new("uwo.ca"),
        Arc::new(SessionRegistry::new(60)),
    ))
}

pub(crate) fn sign_up_form(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: Some(password.to_string()),
    }
}

pub(crate) fn registration() -> RegistrationDetails {
    RegistrationDetails {
        display_name: "Sam Lee".to_string(),
        student_number: "300123456".to_string(),
        phone: "613-555-0100".to_string(),
    }
}
