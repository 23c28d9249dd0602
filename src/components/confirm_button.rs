//! Confirm Button Component
//!
//! Guards irreversible task actions such as discarding a daily task.

use leptos::prelude::*;

/// Button that runs `on_confirm` only after the user answers `prompt`.
/// Cancelling puts the original button back.
#[component]
pub fn ConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] prompt: String,
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);

    view! {
        <Show when=move || !asking.get()>
            <button
                class=button_class.clone()
                title=label.clone()
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_asking.set(true);
                }
            >
                {label.clone()}
            </button>
        </Show>
        <Show when=move || asking.get()>
            <span class="inline-confirm">
                <span class="inline-confirm-text">{prompt.clone()}</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_confirm.run(());
                    }
                >
                    "确认"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                    }
                >
                    "取消"
                </button>
            </span>
        </Show>
    }
}
