use crate::components::login_button::LoginButton;
use leptos::prelude::*;

#[component]
pub fn LoginPrompt() -> impl IntoView {
    view! {
        <section class="login-prompt">
            <div class="login-icon">"🔑"</div>
            <p>"Log in with Spotify to see your playlists."</p>
            <p class="text-muted">"Simmer the Toads only reorders playlists you pick."</p>
            <LoginButton />
        </section>
    }
}
