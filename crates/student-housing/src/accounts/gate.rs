use serde::Serialize;

use super::domain::{ApprovalStatus, UserProfile, UserRole};
use crate::config::AccessConfig;

/// What the current visitor is, as far as route and affordance decisions go.
///
/// The administrator role takes precedence for display but keeps the underlying status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessState {
    Unauthenticated,
    Pending,
    Approved,
    Rejected,
    Administrator { status: ApprovalStatus },
}

impl AccessState {
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        let Some(profile) = profile else {
            return AccessState::Unauthenticated;
        };

        match (profile.role, profile.approval_status) {
            (UserRole::Admin, status) => AccessState::Administrator { status },
            (UserRole::Student, ApprovalStatus::Pending) => AccessState::Pending,
            (UserRole::Student, ApprovalStatus::Approved) => AccessState::Approved,
            (UserRole::Student, ApprovalStatus::Rejected) => AccessState::Rejected,
        }
    }

    pub fn approval_status(&self) -> Option<ApprovalStatus> {
        match self {
            AccessState::Unauthenticated => None,
            AccessState::Pending => Some(ApprovalStatus::Pending),
            AccessState::Approved => Some(ApprovalStatus::Approved),
            AccessState::Rejected => Some(ApprovalStatus::Rejected),
            AccessState::Administrator { status } => Some(*status),
        }
    }
}

/// Informational banner shown to signed-in users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBanner {
    pub status: ApprovalStatus,
    pub message: &'static str,
}

impl StatusBanner {
    pub fn for_status(status: ApprovalStatus) -> Self {
        let message = match status {
            ApprovalStatus::Pending => {
                "Your account is pending admin approval. You can browse but some features are restricted."
            }
            ApprovalStatus::Approved => "Your account has been approved. Welcome!",
            ApprovalStatus::Rejected => "Your account was not approved. Please contact support.",
        };
        Self { status, message }
    }
}

/// Which areas each access state may reach.
///
/// Administrative areas always require the administrator role. Browsing only requires a
/// signed-in account unless `restrict_unapproved_browsing` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    pub restrict_unapproved_browsing: bool,
}

impl AccessPolicy {
    pub fn from_config(config: &AccessConfig) -> Self {
        Self {
            restrict_unapproved_browsing: config.restrict_unapproved_browsing,
        }
    }

    pub fn can_browse(&self, state: AccessState) -> bool {
        match state {
            AccessState::Unauthenticated => false,
            AccessState::Approved | AccessState::Administrator { .. } => true,
            AccessState::Pending | AccessState::Rejected => !self.restrict_unapproved_browsing,
        }
    }

    pub fn can_administer(&self, state: AccessState) -> bool {
        matches!(state, AccessState::Administrator { .. })
    }
}
