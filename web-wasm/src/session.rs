//! Reactive view over the shared session store
//!
//! The store stays the only writer; every write is mirrored into a signal so
//! the header and the Home tab re-render.

use crate::api::FetchClient;
use leptos::prelude::*;
use simmer_common::{Result, Session, SessionStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct SessionContext {
    store: Arc<SessionStore>,
    session: RwSignal<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        let store = Arc::new(SessionStore::new());
        let session = RwSignal::new(store.snapshot());
        Self { store, session }
    }

    pub fn signal(&self) -> ReadSignal<Session> {
        self.session.read_only()
    }

    pub async fn initialize(&self, api: &FetchClient) {
        let session = self.store.initialize(api).await;
        self.session.try_set(session);
    }

    pub async fn login_completed(&self, api: &FetchClient) {
        let session = self.store.login_completed(api).await;
        self.session.try_set(session);
    }

    pub async fn logout(&self, api: &FetchClient) -> Result<String> {
        let result = self.store.logout(api).await;
        self.session.try_set(self.store.snapshot());
        result
    }

    /// The backend rejected a request as unauthenticated.
    pub fn expire(&self) {
        self.store.set_logged_in(false);
        self.session.try_set(self.store.snapshot());
    }
}
