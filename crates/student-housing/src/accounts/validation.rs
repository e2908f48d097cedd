use super::domain::{Credentials, RegistrationDetails};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Form-level validation failures. Recoverable by the user; submission is blocked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingCredentials,
    #[error("Only @{domain} emails are allowed.")]
    DisallowedDomain { domain: String },
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least {} characters.", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
    #[error("All fields are required.")]
    MissingRegistrationFields,
}

/// Validates sign-in/sign-up forms against the allowed university domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPolicy {
    allowed_domain: String,
}

impl CredentialPolicy {
    pub fn new(allowed_domain: impl Into<String>) -> Self {
        Self {
            allowed_domain: allowed_domain.into().trim().to_ascii_lowercase(),
        }
    }

    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    pub fn email_allowed(&self, email: &str) -> bool {
        email
            .trim()
            .split_once('@')
            .map(|(_, domain)| domain.to_ascii_lowercase() == self.allowed_domain)
            .unwrap_or(false)
    }

    pub fn check_sign_in(&self, credentials: &Credentials) -> Result<(), ValidationError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if !self.email_allowed(&credentials.email) {
            return Err(ValidationError::DisallowedDomain {
                domain: self.allowed_domain.clone(),
            });
        }
        Ok(())
    }

    pub fn check_sign_up(&self, credentials: &Credentials) -> Result<(), ValidationError> {
        self.check_sign_in(credentials)?;
        if credentials.confirm_password.as_deref() != Some(credentials.password.as_str()) {
            return Err(ValidationError::PasswordMismatch);
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Trim every field and require all of them.
pub fn normalize_registration(
    details: RegistrationDetails,
) -> Result<RegistrationDetails, ValidationError> {
    let normalized = RegistrationDetails {
        display_name: details.display_name.trim().to_string(),
        student_number: details.student_number.trim().to_string(),
        phone: details.phone.trim().to_string(),
    };

    if normalized.display_name.is_empty()
        || normalized.student_number.is_empty()
        || normalized.phone.is_empty()
    {
        return Err(ValidationError::MissingRegistrationFields);
    }
    Ok(normalized)
}
