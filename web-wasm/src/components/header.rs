//! Header: title, tabs and the login control

use crate::alerts::Alerts;
use crate::api::FetchClient;
use crate::components::login_button::LoginButton;
use crate::session::SessionContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use simmer_common::{login_control, LoginControl, Profile, SimmerApi, Tab};

#[component]
pub fn Header(tab: ReadSignal<Tab>, set_tab: WriteSignal<Tab>) -> impl IntoView {
    let session = expect_context::<SessionContext>().signal();

    view! {
        <header class="header">
            <h1>"🐸 Simmer the Toads"</h1>

            <nav class="tabs">
                {Tab::ALL
                    .into_iter()
                    .map(|t| {
                        view! {
                            <button
                                class="tab"
                                class:active=move || tab.get() == t
                                on:click=move |_| set_tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="login-control">
                {move || match login_control(&session.get()) {
                    LoginControl::LoginButton => view! { <LoginButton /> }.into_any(),
                    LoginControl::Account => view! { <Account /> }.into_any(),
                }}
            </div>
        </header>
    }
}

#[component]
fn Account() -> impl IntoView {
    let api = expect_context::<FetchClient>();
    let session = expect_context::<SessionContext>();
    let alerts = expect_context::<Alerts>();
    let (profile, set_profile) = signal(None::<Profile>);

    spawn_local({
        let api = api.clone();
        let session = session.clone();
        async move {
            match api.me().await {
                Ok(me) => {
                    set_profile.try_set(Some(me));
                }
                Err(e) if e.requires_login() => session.expire(),
                Err(e) => alerts.error(format!("Could not load your profile: {}", e)),
            }
        }
    });

    let on_logout = move |_| {
        let api = api.clone();
        let session = session.clone();
        spawn_local(async move {
            if let Err(e) = session.logout(&api).await {
                alerts.error(format!("Logout failed: {}", e));
            }
        });
    };

    view! {
        <div class="account">
            {move || profile.get().map(|p| {
                let name = p.display_name_or_default().to_string();
                let avatar = p.avatar_url().map(str::to_string);
                let link = p.profile_url().map(str::to_string).unwrap_or_default();
                view! {
                    <a class="account-link" href=link target="_blank" rel="noopener noreferrer">
                        {avatar.map(|src| view! { <img class="avatar" src=src alt="" /> })}
                        <span>{name}</span>
                    </a>
                }
            })}
            <button class="btn btn-small btn-tertiary" on:click=on_logout>
                "Log out"
            </button>
        </div>
    }
}
