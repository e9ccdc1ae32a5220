//! The admin session flag.

use billet_cache::Cache;

use crate::{AuthError, CredentialVerifier};

/// Storage key of the admin flag.
pub const ADMIN_FLAG_KEY: &str = "adminAuth";

const ADMIN_FLAG_VALUE: &str = "true";

/// Boolean gate in front of the back-office.
///
/// The session is authenticated exactly when storage holds the string
/// `true` under [`ADMIN_FLAG_KEY`].
#[derive(Debug, Clone)]
pub struct AdminSession {
    storage: Cache,
}

impl AdminSession {
    pub fn new(storage: Cache) -> Self {
        Self { storage }
    }

    /// Whether the gate is open. Unreadable storage counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        match self.storage.get_string(ADMIN_FLAG_KEY) {
            Ok(value) => value.as_deref() == Some(ADMIN_FLAG_VALUE),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read admin flag");
                false
            }
        }
    }

    /// Check the credentials and open the gate.
    pub fn login(
        &self,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if let Err(e) = verifier.verify(username, password) {
            tracing::warn!(username, error = %e, "admin login rejected");
            return Err(e);
        }
        self.storage.set_string(ADMIN_FLAG_KEY, ADMIN_FLAG_VALUE)?;
        tracing::info!(username, "admin logged in");
        Ok(())
    }

    /// Close the gate.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.storage.delete(ADMIN_FLAG_KEY)?;
        tracing::info!("admin logged out");
        Ok(())
    }
}
