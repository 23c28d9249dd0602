//! Session Expired Dialog Component
//!
//! Modal shown once per expiry; confirming clears the session and goes to
//! the sign-in page.

use leptos::prelude::*;

use crate::actions;
use crate::context::use_app_context;

#[component]
pub fn SessionExpiredDialog() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <Show when=move || ctx.session_expired.get()>
            <div class="modal-overlay">
                <div class="modal">
                    <h3 class="modal-title">"登录已过期"</h3>
                    <p class="modal-body">"您的登录状态已过期，请重新登录。"</p>
                    <div class="modal-actions">
                        <button class="primary-btn" on:click=move |_| actions::confirm_session_expired(ctx)>
                            "重新登录"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
