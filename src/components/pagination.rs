//! Pagination Component
//!
//! `< [page] >` control with a direct-jump input.

use leptos::prelude::*;

use crate::filter::Paging;

#[component]
pub fn Pagination(
    #[prop(into)] paging: Signal<Paging>,
    #[prop(into)] on_change: Callback<usize>,
) -> impl IntoView {
    let (input, set_input) = signal(String::from("1"));

    // Follow page changes made elsewhere
    Effect::new(move |_| set_input.set(paging.get().page.to_string()));

    // Out-of-range input snaps back to the current page
    let commit = move || {
        let current = paging.get_untracked();
        match current.parse_page(&input.get_untracked()) {
            Some(page) if page != current.page => on_change.run(page),
            Some(_) => {}
            None => set_input.set(current.page.to_string()),
        }
    };

    view! {
        <Show when=move || { paging.get().total_pages() > 1 }>
            <div class="pagination">
                <button
                    disabled=move || !paging.get().has_prev()
                    on:click=move |_| on_change.run(paging.get_untracked().page - 1)
                >
                    "<"
                </button>
                <input
                    class="page-input"
                    type="text"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            commit();
                        }
                    }
                    on:blur=move |_| commit()
                />
                <button
                    disabled=move || !paging.get().has_next()
                    on:click=move |_| on_change.run(paging.get_untracked().page + 1)
                >
                    ">"
                </button>
                <span class="page-info">
                    {move || {
                        let p = paging.get();
                        format!("Page {} of {} ({} items)", p.page, p.total_pages(), p.total)
                    }}
                </span>
            </div>
        </Show>
    }
}
