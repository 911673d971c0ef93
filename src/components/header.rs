//! Header Component
//!
//! Page switcher.

use leptos::prelude::*;

use crate::context::{use_app_context, Page};

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <header class="app-header">
            <h1>"Task Queue"</h1>
            <nav class="page-tabs">
                {Page::ALL.iter().map(|page| {
                    let page = *page;
                    view! {
                        <button
                            class=move || if ctx.page.get() == page { "page-tab active" } else { "page-tab" }
                            on:click=move |_| ctx.navigate(page)
                        >
                            {page.title()}
                        </button>
                    }
                }).collect_view()}
            </nav>
        </header>
    }
}
