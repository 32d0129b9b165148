//! Main application component

use crate::alerts::Alerts;
use crate::api::{FetchClient, API_BASE};
use crate::components::{
    about::About, alert_banner::AlertBanner, header::Header, login_prompt::LoginPrompt,
    playlist_panel::PlaylistPanel,
};
use crate::session::SessionContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use simmer_common::{home_view, HomeView, Tab};
use std::time::Duration;

/// Milliseconds for the browser timers, saturating at `u32::MAX`.
pub fn timer_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[component]
pub fn App() -> impl IntoView {
    let api = FetchClient::new(API_BASE);
    let session = SessionContext::new();
    let alerts = Alerts::new();
    provide_context(api.clone());
    provide_context(session.clone());
    provide_context(alerts);

    let (tab, set_tab) = signal(Tab::Home);

    // One session check on startup; no periodic revalidation.
    spawn_local({
        let session = session.clone();
        async move { session.initialize(&api).await }
    });

    view! {
        <div class="container">
            <Header tab=tab set_tab=set_tab />

            <AlertBanner notice=alerts.notice() on_dismiss=move |_| alerts.dismiss() />

            <main>
                {move || match tab.get() {
                    Tab::Home => view! { <Home /> }.into_any(),
                    Tab::About => view! { <About /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn Home() -> impl IntoView {
    let session = expect_context::<SessionContext>().signal();

    view! {
        <Show
            when=move || home_view(&session.get()) == HomeView::Playlists
            fallback=|| view! { <LoginPrompt /> }
        >
            <PlaylistPanel />
        </Show>
    }
}
