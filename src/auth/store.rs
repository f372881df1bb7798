//! Shared storage for the active [`Session`].
//!
//! The store replaces the original SDK's static "current user" slot with an
//! explicitly injected object: the [`HttpClient`](crate::clients::HttpClient)
//! holds an `Arc<SessionStore>` and reads the token at dispatch time, so a
//! refreshed token is picked up by the retried request automatically.
//!
//! The store also owns the refresh gate. Concurrent requests that all hit a
//! 401 serialize on the gate; the first one performs the login-by-token
//! call, and the rest observe the replaced token and skip their own refresh.

use std::sync::RwLock;

use tokio::sync::{Mutex, MutexGuard};

use crate::auth::Session;

/// Holds the single active [`Session`] shared by all requests of a client.
///
/// Reads are cheap (`RwLock` + clone); writes happen only on login and on
/// token refresh. Last writer wins.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    refresh_gate: Mutex<()>,
}

impl SessionStore {
    /// Creates an empty store with no active session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the current session, if one is set.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned, which can only happen if a
    /// thread panicked while holding it.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.read().expect("session lock poisoned").clone()
    }

    /// Replaces the current session.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    pub fn set_current(&self, session: Session) {
        *self.current.write().expect("session lock poisoned") = Some(session);
    }

    /// Clears the current session.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    pub fn clear(&self) {
        *self.current.write().expect("session lock poisoned") = None;
    }

    /// Acquires the refresh gate.
    ///
    /// Held for the duration of a login-by-token call so that N concurrent
    /// 401s produce at most one refresh. Callers must re-read
    /// [`current`](Self::current) after acquiring the gate: if the token
    /// changed while waiting, another task already refreshed.
    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_gate.lock().await
    }
}

// Verify SessionStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionStore>();
};
