//! App-wide error banner
//!
//! Backend failures outside a transformation batch (playlist load, profile,
//! login, logout) land here. The banner clears itself after `ALERT_TIMEOUT`
//! unless a newer message replaced it.

use crate::app::timer_millis;
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use simmer_common::{Notice, Severity, ALERT_TIMEOUT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertState {
    notice: Option<Notice>,
    generation: u64,
}

impl AlertState {
    /// Returns the generation the auto-dismiss timer should wait for.
    pub fn show(&mut self, notice: Notice) -> u64 {
        self.generation += 1;
        self.notice = Some(notice);
        self.generation
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.clone()
    }

    pub fn dismiss(&mut self) {
        self.notice = None;
    }

    pub fn dismiss_generation(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.notice.is_none() {
            return false;
        }
        self.dismiss();
        true
    }
}

#[derive(Clone, Copy)]
pub struct Alerts {
    state: RwSignal<AlertState>,
}

impl Alerts {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AlertState::default()),
        }
    }

    pub fn error(&self, text: impl Into<String>) {
        let notice = Notice::new(Severity::Error, text.into());
        let state = self.state;
        if let Some(generation) = state.try_update(|s| s.show(notice)) {
            spawn_local(async move {
                TimeoutFuture::new(timer_millis(ALERT_TIMEOUT)).await;
                state.try_update(|s| s.dismiss_generation(generation));
            });
        }
    }

    pub fn notice(&self) -> Signal<Option<Notice>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.notice()))
    }

    pub fn dismiss(&self) {
        self.state.update(|s| s.dismiss());
    }
}
