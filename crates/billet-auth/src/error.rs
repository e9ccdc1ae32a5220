//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A login field was left empty.
    #[error("please fill in all fields")]
    MissingFields,

    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No admin password hash has been configured.
    #[error("admin credentials are not configured")]
    NotConfigured,

    /// The configured hash is not a valid PHC string.
    #[error("invalid password hash: {0}")]
    InvalidHash(String),

    /// Hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] billet_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::MissingFields | AuthError::InvalidCredentials)
    }
}
