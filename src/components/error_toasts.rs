//! Error Toasts Component
//!
//! Stack of error notifications. Each toast dismisses itself after the
//! configured duration or on click.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::error::ErrorCategory;
use crate::store::Toast;

fn toast_class(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Network => "toast toast-network",
        ErrorCategory::Validation => "toast toast-validation",
        ErrorCategory::Server => "toast toast-server",
    }
}

#[component]
pub fn ErrorToasts() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = ctx.toasts;
    // 0 keeps toasts until clicked
    let duration_ms = u32::try_from(ctx.config.toast_duration_ms).unwrap_or(u32::MAX);

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.toasts()
                key=|toast: &Toast| toast.id.clone()
                children=move |toast: Toast| {
                    let id = toast.id.clone();
                    if duration_ms > 0 {
                        let expire_id = id.clone();
                        Timeout::new(duration_ms, move || toasts.dismiss(&expire_id)).forget();
                    }
                    view! {
                        <div class=toast_class(toast.category) on:click=move |_| toasts.dismiss(&id)>
                            <div class="toast-title">{toast.category.title()}</div>
                            <div class="toast-message">{toast.message}</div>
                            <div class="toast-time">{toast.timestamp.format("%H:%M:%S").to_string()}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
