//! About page

use leptos::prelude::*;
use simmer_common::TransformationMethod;

#[component]
pub fn About() -> impl IntoView {
    view! {
        <section class="about">
            <h2>"About"</h2>
            <p>
                "Simmer the Toads reorders the tracks of your Spotify playlists so that "
                "neighbouring songs fit together. Pick one or more playlists on the Home "
                "tab, then choose how hot to cook them."
            </p>
            <ul class="method-list">
                {TransformationMethod::ALL
                    .into_iter()
                    .map(|m| view! {
                        <li>
                            <strong>{m.label()}</strong>
                            " - "
                            {m.description()}
                        </li>
                    })
                    .collect_view()}
            </ul>
            <p class="text-muted">
                "Tick \"Save to Spotify\" to write the new order back to the playlist."
            </p>
        </section>
    }
}
