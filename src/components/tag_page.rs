//! Tag Page Component
//!
//! Tag management: search, create, inline edit, duplicate, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::UpdateTagRequest;
use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::filter::{filter_tags, truncate_text};
use crate::models::{is_hex_color, Tag, DEFAULT_TAG_COLOR, PRESET_TAG_COLORS};

/// Preset color swatches
#[component]
fn ColorPicker(color: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="color-picker">
            {PRESET_TAG_COLORS.iter().map(|(name, hex)| {
                let hex = hex.to_string();
                let check = hex.clone();
                view! {
                    <button
                        type="button"
                        title=*name
                        class=move || if color.get() == check { "swatch active" } else { "swatch" }
                        style=format!("background-color: {};", hex)
                        on:click=move |_| color.set(hex.clone())
                    />
                }
            }).collect_view()}
            <input
                type="text"
                class="color-input"
                prop:value=move || color.get()
                on:input=move |ev| color.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn TagPage(search_ref: NodeRef<leptos::html::Input>) -> impl IntoView {
    let ctx = use_app_context();
    let tags = ctx.tags;

    let (query, set_query) = signal(String::new());
    let (creating, set_creating) = signal(false);
    let new_name = RwSignal::new(String::new());
    let new_color = RwSignal::new(DEFAULT_TAG_COLOR.to_string());

    ctx.reload_tags();

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        let color = new_color.get();
        if name.is_empty() || !is_hex_color(&color) { return; }
        spawn_local(async move {
            if tags.create_tag(name, Some(color)).await.is_ok() {
                new_name.set(String::new());
                new_color.set(DEFAULT_TAG_COLOR.to_string());
                set_creating.set(false);
            }
        });
    };

    let visible = move || filter_tags(&tags.tags(), &query.get());

    view! {
        <section class="tag-page">
            <div class="tag-page-header">
                <h1>"Tags"</h1>
                <input
                    type="text"
                    placeholder="Search tags..."
                    node_ref=search_ref
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button on:click=move |_| set_creating.update(|v| *v = !*v)>"+ New Tag"</button>
            </div>

            <Show when=move || creating.get()>
                <form class="tag-create-form" on:submit=create>
                    <input
                        type="text"
                        placeholder="Tag name"
                        prop:value=move || new_name.get()
                        on:input=move |ev| new_name.set(event_target_value(&ev))
                    />
                    <ColorPicker color=new_color />
                    <button type="submit">"Create"</button>
                </form>
            </Show>

            {move || tags.error().map(|err| view! { <div class="tag-error">{err}</div> })}
            <Show when=move || tags.loading() && tags.tags().is_empty()>
                <div class="tag-loading">"Loading..."</div>
            </Show>

            <div class="tag-list">
                <For
                    each=visible
                    key=|tag: &Tag| (tag.id.clone(), tag.name.clone(), tag.color.clone(), tag.usage_count)
                    children=move |tag: Tag| view! { <TagRow tag=tag /> }
                />
                <Show when=move || !tags.loading() && visible().is_empty()>
                    <div class="no-tags-message">"No tags found"</div>
                </Show>
            </div>
        </section>
    }
}

#[component]
fn TagRow(tag: Tag) -> impl IntoView {
    let ctx = use_app_context();
    let tags = ctx.tags;
    let (editing, set_editing) = signal(false);
    let edit_name = RwSignal::new(tag.name.clone());
    let edit_color = RwSignal::new(tag.color.clone().unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()));

    let color = tag.color.clone().unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
    let update_id = tag.id.clone();
    let delete_id = tag.id.clone();
    let source_tag = tag.clone();

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = edit_name.get().trim().to_string();
        let color = edit_color.get();
        if name.is_empty() || !is_hex_color(&color) { return; }
        let id = update_id.clone();
        spawn_local(async move {
            let request = UpdateTagRequest { name: Some(name), color: Some(color) };
            if tags.update_tag(id, request).await.is_ok() {
                set_editing.set(false);
            }
        });
    };

    view! {
        <div class="tag-row">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <span class="tag-color-dot" style=format!("background-color: {};", color)></span>
                    <span class="tag-name" title=tag.name.clone()>{truncate_text(&tag.name, 40)}</span>
                    <span class="tag-usage">{format!("{} tasks", tag.usage_count)}</span>
                }
            >
                <form class="tag-edit-form" on:submit=save.clone()>
                    <input
                        type="text"
                        prop:value=move || edit_name.get()
                        on:input=move |ev| edit_name.set(event_target_value(&ev))
                    />
                    <ColorPicker color=edit_color />
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                </form>
            </Show>
            <div class="tag-row-actions">
                <button title="Edit" on:click=move |_| set_editing.set(true)>"✎"</button>
                <button
                    title="Duplicate"
                    on:click=move |_| {
                        let tag = source_tag.clone();
                        spawn_local(async move {
                            let _ = tags.duplicate_tag(&tag).await;
                        });
                    }
                >
                    "⧉"
                </button>
                <ConfirmButton
                    label="🗑"
                    button_class="tag-delete-btn"
                    on_confirm=Callback::new(move |_: ()| {
                        let id = delete_id.clone();
                        spawn_local(async move {
                            let _ = tags.delete_tag(id).await;
                        });
                    })
                />
            </div>
        </div>
    }
}
