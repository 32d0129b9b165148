//! Transient outcome banner

use leptos::prelude::*;
use simmer_common::Notice;

#[component]
pub fn AlertBanner<F>(#[prop(into)] notice: Signal<Option<Notice>>, on_dismiss: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        {move || notice.get().map(|notice| {
            let on_dismiss = on_dismiss.clone();
            view! {
                <div class=format!("alert alert-{}", notice.severity.as_str()) role="alert">
                    <span>{notice.text}</span>
                    <button class="alert-close" aria-label="Dismiss" on:click=move |_| on_dismiss(())>
                        "×"
                    </button>
                </div>
            }
        })}
    }
}
