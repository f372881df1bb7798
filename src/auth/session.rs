//! Session management for Appercode API authentication.
//!
//! This module provides the [`Session`] type representing the credentials
//! returned by a login or login-by-token call.

use serde::{Deserialize, Serialize};

/// An authenticated Appercode session.
///
/// Sessions are produced by login operations and replaced wholesale when the
/// session token is refreshed. The `token` is the short-lived credential
/// sent on every authenticated request; the `refresh_token` is the
/// longer-lived credential exchanged for a new session token when the
/// server reports the session as expired.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use appercode::Session;
///
/// let session = Session::new("u1", "t1", "r1", Some("admin".to_string()));
/// assert!(session.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The id of the logged-in user.
    pub user_id: String,

    /// The session token sent on every authenticated request.
    pub token: String,

    /// The refresh token used to obtain a new session token.
    pub refresh_token: String,

    /// The role id assigned to the user, if any.
    pub role: Option<String>,
}

impl Session {
    /// Creates a new session with the specified credentials.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        token: impl Into<String>,
        refresh_token: impl Into<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
            refresh_token: refresh_token.into(),
            role,
        }
    }

    /// Returns `true` if this session carries a usable session token.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_empty()
    }

    /// Returns `true` if this session can be refreshed.
    #[must_use]
    pub fn is_refreshable(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};
