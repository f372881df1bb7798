//! Authentication types for the Appercode SDK.
//!
//! This module provides:
//! - [`Session`]: the credentials returned by a login call
//! - [`SessionStore`]: the shared slot holding the active session
//! - [`AuthError`]: authentication failure variants

mod session;
mod store;

pub use session::Session;
pub use store::SessionStore;

use thiserror::Error;

/// Authentication failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server rejected the provided username/password.
    #[error("Wrong credentials provided for login.")]
    WrongCredentials,

    /// A session refresh was attempted without a prior login.
    #[error("No active session. Log in before making authenticated requests.")]
    NotLoggedIn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert!(AuthError::WrongCredentials.to_string().contains("Wrong credentials"));
        assert!(AuthError::NotLoggedIn.to_string().contains("No active session"));
    }
}
