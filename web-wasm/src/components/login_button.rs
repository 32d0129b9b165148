//! Login button and the popup handshake
//!
//! The auth page opens in a popup. The backend's callback page posts
//! `LOGIN_COMPLETE_MESSAGE` to its opener; a popup that was simply closed also
//! ends the wait. Either way the session is re-checked afterwards.

use crate::alerts::Alerts;
use crate::api::FetchClient;
use crate::app::timer_millis;
use crate::session::SessionContext;
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use simmer_common::{
    wait_for_login, CancelToken, LoginPoll, LoginWait, SimmerApi, LOGIN_COMPLETE_MESSAGE,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::MessageEvent;

const POPUP_NAME: &str = "simmer-login";

/// Only our own origin may end the handshake.
pub fn is_login_complete(event_origin: &str, own_origin: &str, data: Option<&str>) -> bool {
    event_origin == own_origin && data == Some(LOGIN_COMPLETE_MESSAGE)
}

#[component]
pub fn LoginButton() -> impl IntoView {
    let api = expect_context::<FetchClient>();
    let session = expect_context::<SessionContext>();
    let alerts = expect_context::<Alerts>();
    let (pending, set_pending) = signal(false);

    let cancel = CancelToken::new();
    on_cleanup({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    let on_click = move |_| {
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);

        let api = api.clone();
        let session = session.clone();
        let cancel = cancel.clone();
        spawn_local(async move {
            if let Err(message) = run_login(&api, &session, &cancel).await {
                alerts.error(message);
            }
            set_pending.try_set(false);
        });
    };

    view! {
        <div class="login-button">
            <button class="btn btn-primary" disabled=move || pending.get() on:click=on_click>
                {move || if pending.get() { "Waiting for Spotify..." } else { "Log in with Spotify" }}
            </button>
        </div>
    }
}

async fn run_login(
    api: &FetchClient,
    session: &SessionContext,
    cancel: &CancelToken,
) -> Result<(), String> {
    let auth = api.login().await.map_err(|e| format!("Login failed: {}", e))?;
    let window = web_sys::window().ok_or("Login failed: no window")?;

    let popup = window
        .open_with_url_and_target(&auth.auth_url, POPUP_NAME)
        .ok()
        .flatten();
    let Some(popup) = popup else {
        // Popup blocked: leave the app and come back through the redirect.
        return window
            .location()
            .set_href(&auth.auth_url)
            .map_err(|_| "Login failed: could not open the login page".to_string());
    };

    let finished = Rc::new(Cell::new(false));
    let own_origin = window.location().origin().unwrap_or_default();
    let _listener = EventListener::new(&window, "message", {
        let finished = finished.clone();
        move |event| {
            if let Some(event) = event.dyn_ref::<MessageEvent>() {
                let data = event.data().as_string();
                if is_login_complete(&event.origin(), &own_origin, data.as_deref()) {
                    finished.set(true);
                }
            }
        }
    });

    let waited = wait_for_login(
        LoginPoll::default(),
        || {
            let done = finished.get() || popup.closed().unwrap_or(true);
            async move { done }
        },
        |interval| TimeoutFuture::new(timer_millis(interval)),
        cancel,
    )
    .await;

    match waited {
        LoginWait::Completed => {
            session.login_completed(api).await;
            Ok(())
        }
        LoginWait::TimedOut => {
            if popup.close().is_err() {
                warn!("could not close the login popup");
            }
            Err("Login timed out. Please try again.".to_string())
        }
        LoginWait::Cancelled => {
            let _ = popup.close();
            Ok(())
        }
    }
}
