//! Toaster Component

use leptos::prelude::*;

use crate::adapters::ToastKind;
use crate::context::use_app_context;

#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toaster">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=|toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    view! {
                        <div class=class>
                            <div class="toast-message">{toast.message.clone()}</div>
                            {toast.description.clone().map(|d| view! { <div class="toast-description">{d}</div> })}
                        </div>
                    }
                }
            />
        </div>
    }
}
