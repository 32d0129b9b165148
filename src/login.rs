//! Terminal side of the login handshake
//!
//! The OAuth callback sets the backend's session cookie in the browser, so the
//! terminal cannot observe the login on its own. The user pastes that cookie
//! and it is kept only once the backend accepts it.

use crate::client::HttpClient;
use crate::config::Config;
use crate::error::{Result, SimmerError};
use dialoguer::Input;
use simmer_common::SimmerApi;
use tracing::debug;

/// Name of the backend's session cookie
pub const SESSION_COOKIE_NAME: &str = "session";

/// Accepts `session=...`, a full `Cookie` header, or a bare value.
pub fn normalize_cookie(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.strip_prefix("Cookie:").map(str::trim).unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }
    if raw.contains('=') {
        Some(raw.to_string())
    } else {
        Some(format!("{}={}", SESSION_COOKIE_NAME, raw))
    }
}

pub fn prompt_session_cookie() -> Result<String> {
    let cookie: String = Input::new()
        .with_prompt("Session cookie")
        .interact_text()?;
    Ok(cookie)
}

/// Checks the cookie against the backend and stores it in `config` on
/// success. The config is left untouched when the backend refuses it.
pub async fn adopt_browser_session(base_url: &str, config: &mut Config, raw: &str) -> Result<()> {
    let cookie = normalize_cookie(raw).ok_or(SimmerError::SessionRejected)?;
    let client = HttpClient::new(base_url, Some(&cookie), config.request_timeout())?;

    if !client.check_session().await {
        debug!("backend refused the pasted session");
        return Err(SimmerError::SessionRejected);
    }

    config.set_session_cookie(Some(cookie));
    Ok(())
}
