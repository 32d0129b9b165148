//! Login state shared by every view
//!
//! [`SessionStore`] is the single writer; views get a read-only
//! [`SessionReader`]. Nothing revalidates the session in the background.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::api::SimmerApi;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
}

/// Read-only handle on the shared session.
#[derive(Debug, Clone, Default)]
pub struct SessionReader {
    inner: Arc<RwLock<Session>>,
}

impl SessionReader {
    pub fn snapshot(&self) -> Session {
        // A poisoned lock still holds a valid bool.
        match self.inner.read() {
            Ok(session) => *session,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.snapshot().logged_in
    }
}

/// Owner of the session flag. Only the initial check and the login/logout
/// flows write through it.
#[derive(Debug, Default)]
pub struct SessionStore {
    reader: SessionReader,
}

impl SessionStore {
    /// Starts logged out.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reader(&self) -> SessionReader {
        self.reader.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.reader.snapshot()
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        let mut session = match self.reader.inner.write() {
            Ok(session) => session,
            Err(poisoned) => poisoned.into_inner(),
        };
        if session.logged_in != logged_in {
            debug!(logged_in, "session changed");
        }
        session.logged_in = logged_in;
    }

    /// One session check on startup.
    pub async fn initialize<A>(&self, api: &A) -> Session
    where
        A: SimmerApi + ?Sized,
    {
        let logged_in = api.check_session().await;
        self.set_logged_in(logged_in);
        self.snapshot()
    }

    /// Re-checks after a login flow finished.
    pub async fn login_completed<A>(&self, api: &A) -> Session
    where
        A: SimmerApi + ?Sized,
    {
        let session = self.initialize(api).await;
        if session.logged_in {
            info!("logged in");
        } else {
            warn!("login flow finished but the backend still reports no session");
        }
        session
    }

    /// Invalidates the backend session. The local flag is reset even when
    /// the call fails.
    pub async fn logout<A>(&self, api: &A) -> Result<String>
    where
        A: SimmerApi + ?Sized,
    {
        let result = api.logout().await;
        self.set_logged_in(false);
        if let Err(e) = &result {
            warn!(error = %e, "logout request failed");
        }
        result
    }
}
