//! Admin credential checks.

use crate::{AuthError, PasswordHasher};

/// Decides whether a username/password pair belongs to an administrator.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Result<(), AuthError>;
}

/// A single administrator account from configuration.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password_hash: Option<String>,
    hasher: PasswordHasher,
}

impl StaticCredentials {
    /// `password_hash` is an Argon2 PHC string; `None` disables logins.
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.filter(|h| !h.trim().is_empty()),
            hasher: PasswordHasher::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let hash = self.password_hash.as_deref().ok_or(AuthError::NotConfigured)?;
        // Always run the hash check so a wrong username costs the same.
        let password_ok = self.hasher.verify(password, hash)?;
        if username == self.username && password_ok {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> StaticCredentials {
        let hash = PasswordHasher::new().hash("s3cret").unwrap();
        StaticCredentials::new("admin", Some(hash))
    }

    #[test]
    fn test_accepts_matching_pair() {
        assert!(admin().verify("admin", "s3cret").is_ok());
    }

    #[test]
    fn test_rejects_wrong_username_or_password() {
        let creds = admin();
        assert!(matches!(
            creds.verify("root", "s3cret"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            creds.verify("admin", "guess"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unconfigured() {
        let creds = StaticCredentials::new("admin", Some("  ".to_string()));
        assert!(!creds.is_configured());
        assert!(matches!(
            creds.verify("admin", "anything"),
            Err(AuthError::NotConfigured)
        ));
    }
}
