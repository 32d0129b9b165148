//! One button per transformation method, plus the write-back toggle

use leptos::prelude::*;
use simmer_common::{TransformationMethod, Workflow, WorkflowState};

/// Button text; the running method shows progress.
pub fn button_label(method: TransformationMethod, state: &WorkflowState) -> String {
    match state {
        WorkflowState::Submitting { method: running, count } if *running == method => {
            format!("{} ({})...", method.label(), count)
        }
        _ => method.label().to_string(),
    }
}

#[component]
pub fn MethodButtons<FS>(workflow: RwSignal<Workflow>, on_submit: FS) -> impl IntoView
where
    FS: Fn(TransformationMethod) + 'static + Clone + Send + Sync,
{
    let is_submitting = move || workflow.with(|w| w.is_submitting());

    view! {
        <div class="method-buttons">
            {TransformationMethod::ALL
                .into_iter()
                .map(|method| {
                    let on_submit = on_submit.clone();
                    view! {
                        <button
                            class="btn btn-primary"
                            title=method.description()
                            disabled=is_submitting
                            on:click=move |_| on_submit(method)
                        >
                            {move || workflow.with(|w| button_label(method, w.state()))}
                        </button>
                    }
                })
                .collect_view()}

            <label class="write-back">
                <input
                    type="checkbox"
                    prop:checked=move || workflow.with(|w| w.write_back())
                    disabled=is_submitting
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        workflow.update(|w| w.set_write_back(checked));
                    }
                />
                "Save to Spotify"
            </label>
        </div>
    }
}
