//! Task Form Component
//!
//! Inline create/edit form with parent selector and tag picker.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{CreateTaskRequest, UpdateTaskRequest};
use crate::context::use_app_context;
use crate::filter::truncate_text;
use crate::models::{TaskHierarchy, DEFAULT_TAG_COLOR};
use crate::tree::parent_candidates;

/// Which form, if any, is open
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Closed,
    Create,
    Edit(TaskHierarchy),
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Closed)
    }
}

#[component]
pub fn TaskForm(mode: RwSignal<FormMode>) -> impl IntoView {
    move || match mode.get() {
        FormMode::Closed => ().into_any(),
        FormMode::Create => view! { <TaskFormBody mode=mode editing=None /> }.into_any(),
        FormMode::Edit(task) => view! { <TaskFormBody mode=mode editing=Some(task) /> }.into_any(),
    }
}

#[component]
fn TaskFormBody(mode: RwSignal<FormMode>, editing: Option<TaskHierarchy>) -> impl IntoView {
    let ctx = use_app_context();

    let (title, set_title) = signal(editing.as_ref().map(|t| t.title.clone()).unwrap_or_default());
    let (description, set_description) =
        signal(editing.as_ref().and_then(|t| t.description.clone()).unwrap_or_default());
    let (tags, set_tags) = signal(editing.as_ref().map(|t| t.tags.clone()).unwrap_or_default());
    let (parent_id, set_parent_id) = signal(editing.as_ref().and_then(|t| t.parent_id.clone()));
    let (new_tag, set_new_tag) = signal(String::new());

    let editing_id = editing.as_ref().map(|t| t.id.clone());
    let heading = if editing.is_some() { "Edit Task" } else { "Create New Task" };
    let submit_label = if editing.is_some() { "Update" } else { "Create" };

    let title_ref: NodeRef<leptos::html::Input> = NodeRef::new();
    Effect::new(move |_| {
        if let Some(input) = title_ref.get() {
            let _ = input.focus();
        }
    });

    let exclude = editing_id.clone();
    let candidates = move || parent_candidates(&ctx.tasks.hierarchy(), exclude.as_deref());

    let toggle_tag = move |name: String| {
        set_tags.update(|selected| {
            if let Some(index) = selected.iter().position(|t| *t == name) {
                selected.remove(index);
            } else {
                selected.push(name);
            }
        });
    };

    let add_new_tag = move |_| {
        let name = new_tag.get().trim().to_string();
        if name.is_empty() { return; }
        spawn_local(async move {
            if ctx.tags.create_tag(name.clone(), Some(DEFAULT_TAG_COLOR.to_string())).await.is_ok() {
                set_new_tag.set(String::new());
                set_tags.update(|selected| {
                    if !selected.contains(&name) {
                        selected.push(name);
                    }
                });
            }
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title_value = title.get().trim().to_string();
        if title_value.is_empty() { return; }
        let description_value = description.get();
        let tags_value = tags.get();
        let parent_value = parent_id.get();
        let editing_id = editing_id.clone();

        spawn_local(async move {
            let saved = match editing_id {
                None => {
                    let request = CreateTaskRequest {
                        title: title_value,
                        description: (!description_value.trim().is_empty()).then_some(description_value),
                        tags: tags_value,
                        parent_id: parent_value,
                    };
                    ctx.tasks.create_task(request).await.map(|_| ())
                }
                Some(id) => {
                    let request = UpdateTaskRequest {
                        title: Some(title_value),
                        description: Some(description_value),
                        tags: Some(tags_value),
                        parent_id: parent_value,
                        ..Default::default()
                    };
                    ctx.tasks.update_task(id, request).await.map(|_| ())
                }
            };
            if saved.is_ok() {
                mode.set(FormMode::Closed);
                ctx.reload_task_page();
            }
        });
    };

    view! {
        <div class="task-form-overlay">
            <form class="task-form" on:submit=submit>
                <h2>{heading}</h2>

                <label>"Title"</label>
                <input
                    type="text"
                    required
                    node_ref=title_ref
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />

                <label>"Parent Task"</label>
                <select
                    prop:value=move || parent_id.get().unwrap_or_default()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        set_parent_id.set((!value.is_empty()).then_some(value));
                    }
                >
                    <option value="">"None (Root Task)"</option>
                    {move || candidates().into_iter().map(|task| {
                        let selected = parent_id.get_untracked().as_deref() == Some(task.id.as_str());
                        view! {
                            <option value=task.id.clone() selected=selected>{truncate_text(&task.title, 50)}</option>
                        }
                    }).collect_view()}
                </select>

                <label>"Description"</label>
                <textarea
                    rows="4"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>

                <label>"Tags"</label>
                <div class="tag-picker">
                    {move || ctx.tags.tags().into_iter().map(|tag| {
                        let name = tag.name.clone();
                        let check_name = tag.name.clone();
                        let color = tag.color.clone().unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
                        view! {
                            <button
                                type="button"
                                class=move || if tags.get().contains(&check_name) { "tag-chip active" } else { "tag-chip" }
                                style=format!("border-color: {};", color)
                                on:click=move |_| toggle_tag(name.clone())
                            >
                                {tag.name}
                            </button>
                        }
                    }).collect_view()}
                    <input
                        type="text"
                        class="new-tag-input"
                        placeholder="Add tags..."
                        prop:value=move || new_tag.get()
                        on:input=move |ev| set_new_tag.set(event_target_value(&ev))
                    />
                    <button type="button" on:click=add_new_tag>"+"</button>
                </div>

                <div class="form-actions">
                    <button type="button" class="secondary" on:click=move |_| mode.set(FormMode::Closed)>"Cancel"</button>
                    <button type="submit">{submit_label}</button>
                </div>
            </form>
        </div>
    }
}
