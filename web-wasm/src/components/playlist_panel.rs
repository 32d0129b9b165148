//! Home tab for a logged-in user: playlists, methods and the outcome banner
//!
//! Owns the workflow. A batch runs in a local task; when the panel unmounts
//! the task's writes become no-ops.

use crate::alerts::Alerts;
use crate::api::FetchClient;
use crate::app::timer_millis;
use crate::components::{
    alert_banner::AlertBanner, method_buttons::MethodButtons, playlist_card::PlaylistGrid,
};
use crate::session::SessionContext;
use gloo::timers::future::TimeoutFuture;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use simmer_common::{
    run_batch, Playlist, PlaylistRef, SimmerApi, TransformationMethod, Workflow, ALERT_TIMEOUT,
};

#[component]
pub fn PlaylistPanel() -> impl IntoView {
    let api = expect_context::<FetchClient>();
    let session = expect_context::<SessionContext>();
    let alerts = expect_context::<Alerts>();

    let (playlists, set_playlists) = signal(Vec::<Playlist>::new());
    let (loading, set_loading) = signal(true);
    let workflow = RwSignal::new(Workflow::new());

    spawn_local({
        let api = api.clone();
        let session = session.clone();
        async move {
            match api.list_playlists().await {
                Ok(items) => {
                    set_playlists.try_set(items);
                }
                Err(e) if e.requires_login() => session.expire(),
                Err(e) => alerts.error(format!("Could not load playlists: {}", e)),
            }
            set_loading.try_set(false);
        }
    });

    let on_toggle = move |playlist: PlaylistRef| {
        workflow.update(|w| {
            if let Err(e) = w.toggle(&playlist) {
                warn!("selection change ignored: {}", e);
            }
        });
    };

    let on_submit = move |method: TransformationMethod| {
        let batch = match workflow.try_update(|w| w.begin(method)) {
            Some(Ok(Some(batch))) => batch,
            Some(Ok(None)) => {
                schedule_dismiss(workflow, workflow.with_untracked(|w| w.generation()));
                return;
            }
            Some(Err(e)) => {
                warn!("submission ignored: {}", e);
                return;
            }
            None => return,
        };

        let api = api.clone();
        let session = session.clone();
        spawn_local(async move {
            let report = run_batch(&api, &batch).await;
            let requires_login = report.requires_login();
            if let Some(generation) = workflow.try_update(|w| w.complete(report)) {
                schedule_dismiss(workflow, generation);
            }
            if requires_login {
                session.expire();
            }
        });
    };

    let notice = Signal::derive(move || workflow.with(|w| w.notice()));
    let on_dismiss = move |_| workflow.update(|w| w.dismiss());

    view! {
        <section class="playlist-panel">
            <AlertBanner notice=notice on_dismiss=on_dismiss />

            <MethodButtons workflow=workflow on_submit=on_submit />

            <p class="selection-count">
                {move || match workflow.with(|w| w.selection().len()) {
                    0 => "No playlists selected".to_string(),
                    1 => "1 playlist selected".to_string(),
                    n => format!("{} playlists selected", n),
                }}
            </p>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-muted">"Loading playlists..."</p> }
            >
                <Show
                    when=move || !playlists.get().is_empty()
                    fallback=|| view! { <p class="text-muted">"No playlists found."</p> }
                >
                    <PlaylistGrid playlists=playlists workflow=workflow on_toggle=on_toggle />
                </Show>
            </Show>
        </section>
    }
}

/// Clears the banner after `ALERT_TIMEOUT` unless a newer outcome replaced it.
fn schedule_dismiss(workflow: RwSignal<Workflow>, generation: u64) {
    spawn_local(async move {
        TimeoutFuture::new(timer_millis(ALERT_TIMEOUT)).await;
        workflow.try_update(|w| w.dismiss_generation(generation));
    });
}
