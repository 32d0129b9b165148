//! Playlist grid and cards
//!
//! Cards are controlled: membership comes from the parent's pending selection
//! and a click only reports the playlist back.

use leptos::prelude::*;
use simmer_common::{Playlist, PlaylistRef, Workflow};

#[component]
pub fn PlaylistGrid<FT>(
    playlists: ReadSignal<Vec<Playlist>>,
    workflow: RwSignal<Workflow>,
    on_toggle: FT,
) -> impl IntoView
where
    FT: Fn(PlaylistRef) + 'static + Clone + Send + Sync,
{
    let disabled = Signal::derive(move || workflow.with(|w| w.is_submitting()));

    view! {
        <div class="playlist-grid">
            <For
                each=move || playlists.get()
                key=|playlist| playlist.id.clone()
                children=move |playlist| {
                    let on_toggle = on_toggle.clone();
                    let selected = {
                        let id = playlist.id.clone();
                        Signal::derive(move || workflow.with(|w| w.is_selected(&id)))
                    };
                    view! {
                        <PlaylistCard
                            playlist=playlist
                            selected=selected
                            disabled=disabled
                            on_toggle=on_toggle
                        />
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn PlaylistCard<FT>(
    playlist: Playlist,
    #[prop(into)] selected: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    on_toggle: FT,
) -> impl IntoView
where
    FT: Fn(PlaylistRef) + 'static + Clone + Send + Sync,
{
    let cover = match playlist.cover_image_url.clone() {
        Some(src) => view! { <img src=src alt=playlist.name.clone() /> }.into_any(),
        None => view! { <div class="cover-placeholder">"🐸"</div> }.into_any(),
    };
    let playlist_ref = playlist.to_ref();

    view! {
        <div
            class="playlist-card"
            class:selected=move || selected.get()
            class:disabled=move || disabled.get()
            role="checkbox"
            aria-checked=move || selected.get().to_string()
            aria-disabled=move || disabled.get().to_string()
            on:click=move |_| {
                if !disabled.get_untracked() {
                    on_toggle(playlist_ref.clone());
                }
            }
        >
            {cover}
            <div class="playlist-info">
                <h4>{playlist.name.clone()}</h4>
                <p class="text-muted">{playlist.description.clone()}</p>
            </div>
        </div>
    }
}
