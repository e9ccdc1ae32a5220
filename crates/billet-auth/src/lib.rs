//! Back-office authentication for Billetterie.
//!
//! A boolean session flag in storage guards the admin views; a
//! [`CredentialVerifier`] decides who may set it.

mod credentials;
mod error;
mod password;
mod session;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use session::{AdminSession, ADMIN_FLAG_KEY};
