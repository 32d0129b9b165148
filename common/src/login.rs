//! Waiting for the OAuth popup/browser round trip
//!
//! The caller supplies a probe (popup closed, message received, backend
//! reports a session...) and a sleep function for its runtime. Polling is
//! bounded by a timeout and can be cancelled.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Message the login popup posts to its opener once the callback ran.
pub const LOGIN_COMPLETE_MESSAGE: &str = "simmer-login-complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginPoll {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for LoginPoll {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            timeout: Duration::from_secs(300),
        }
    }
}

impl LoginPoll {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Number of probes that fit in the timeout (at least one).
    pub fn max_attempts(&self) -> u64 {
        let interval = self.interval.as_millis().max(1);
        let attempts = self.timeout.as_millis().div_ceil(interval);
        u64::try_from(attempts).unwrap_or(u64::MAX).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginWait {
    Completed,
    TimedOut,
    Cancelled,
}

/// Cancels a pending wait, e.g. when the view that started it goes away.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub async fn wait_for_login<P, PF, S, SF>(
    policy: LoginPoll,
    mut probe: P,
    sleep: S,
    cancel: &CancelToken,
) -> LoginWait
where
    P: FnMut() -> PF,
    PF: Future<Output = bool>,
    S: Fn(Duration) -> SF,
    SF: Future<Output = ()>,
{
    let attempts = policy.max_attempts();
    for attempt in 1..=attempts {
        if cancel.is_cancelled() {
            debug!(attempt, "login wait cancelled");
            return LoginWait::Cancelled;
        }
        if probe().await {
            debug!(attempt, "login completed");
            return LoginWait::Completed;
        }
        if attempt < attempts {
            sleep(policy.interval).await;
        }
    }
    debug!(attempts, "login wait timed out");
    LoginWait::TimedOut
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_max_attempts() {
        let poll = LoginPoll::new(Duration::from_millis(500), Duration::from_secs(2));
        assert_eq!(poll.max_attempts(), 4);

        let poll = LoginPoll::new(Duration::from_millis(300), Duration::from_secs(1));
        assert_eq!(poll.max_attempts(), 4);

        let poll = LoginPoll::new(Duration::from_secs(1), Duration::ZERO);
        assert_eq!(poll.max_attempts(), 1);

        assert_eq!(LoginPoll::default().max_attempts(), 600);
    }

    #[test]
    fn test_completes_when_probe_succeeds() {
        let probes = Cell::new(0);
        let sleeps = Cell::new(0);
        let result = block_on(wait_for_login(
            LoginPoll::new(Duration::from_millis(10), Duration::from_secs(1)),
            || {
                probes.set(probes.get() + 1);
                let done = probes.get() == 3;
                async move { done }
            },
            |_| {
                sleeps.set(sleeps.get() + 1);
                async {}
            },
            &CancelToken::new(),
        ));

        assert_eq!(result, LoginWait::Completed);
        assert_eq!(probes.get(), 3);
        assert_eq!(sleeps.get(), 2);
    }

    #[test]
    fn test_times_out_after_max_attempts() {
        let probes = Cell::new(0);
        let result = block_on(wait_for_login(
            LoginPoll::new(Duration::from_millis(100), Duration::from_millis(500)),
            || {
                probes.set(probes.get() + 1);
                async { false }
            },
            |_| async {},
            &CancelToken::new(),
        ));

        assert_eq!(result, LoginWait::TimedOut);
        assert_eq!(probes.get(), 5);
    }

    #[test]
    fn test_cancel_stops_polling() {
        let cancel = CancelToken::new();
        let probes = Cell::new(0);
        let result = block_on(wait_for_login(
            LoginPoll::default(),
            || {
                probes.set(probes.get() + 1);
                async { false }
            },
            |_| {
                cancel.cancel();
                async {}
            },
            &cancel,
        ));

        assert_eq!(result, LoginWait::Cancelled);
        assert_eq!(probes.get(), 1);
    }
}
