//! Task Pool Component
//!
//! Draft/active task hierarchy with search, status and tag filters.
//! Clicking a row selects it for keyboard shortcuts; parents expand.

use std::collections::HashSet;

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::filter::PoolFilter;
use crate::models::{TaskHierarchy, TaskStatus, DEFAULT_TAG_COLOR};
use crate::tree::{child_progress, flatten_hierarchy};

fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "✔",
        TaskStatus::Active => "●",
        TaskStatus::Draft | TaskStatus::Archived => "○",
    }
}

#[component]
pub fn TaskPool(
    search_ref: NodeRef<leptos::html::Input>,
    #[prop(into)] on_create: Callback<()>,
    #[prop(into)] on_edit: Callback<TaskHierarchy>,
    #[prop(into)] on_archive: Callback<TaskHierarchy>,
    #[prop(into)] on_enqueue: Callback<TaskHierarchy>,
) -> impl IntoView {
    let ctx = use_app_context();
    let filter = RwSignal::new(PoolFilter::default());
    let expanded = RwSignal::new(HashSet::<String>::new());

    let rows = move || {
        let visible = filter.with(|f| f.apply(&ctx.tasks.hierarchy()));
        expanded.with(|open| flatten_hierarchy(&visible, Some(open)))
    };

    let status_chip = move |status: TaskStatus, label: &'static str| {
        view! {
            <button
                class=move || if filter.with(|f| f.statuses.contains(&status)) { "filter-chip active" } else { "filter-chip" }
                on:click=move |_| filter.update(|f| f.toggle_status(status))
            >
                {label}
            </button>
        }
    };

    view! {
        // Clicking empty space clears the selection
        <section class="task-pool" on:click=move |_| ctx.selection.clear()>
            <div class="pool-toolbar">
                <input
                    type="text"
                    placeholder="Search tasks..."
                    node_ref=search_ref
                    prop:value=move || filter.with(|f| f.query.clone())
                    on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
                    on:click=|ev| ev.stop_propagation()
                />
                <Show when=move || filter.with(|f| !f.query.is_empty())>
                    <button class="ghost" on:click=move |_| filter.update(|f| f.query.clear())>"×"</button>
                </Show>
                <button
                    class="create-btn"
                    title="Create Task"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_create.run(());
                    }
                >
                    "+"
                </button>
            </div>

            <div class="pool-filters" on:click=|ev| ev.stop_propagation()>
                {status_chip(TaskStatus::Draft, "Draft")}
                {status_chip(TaskStatus::Active, "Active")}
                {move || ctx.tags.tags().into_iter().map(|tag| {
                    let name = tag.name.clone();
                    let check_name = tag.name.clone();
                    let color = tag.color.clone().unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
                    view! {
                        <button
                            class=move || if filter.with(|f| f.tags.contains(&check_name)) { "filter-chip tag active" } else { "filter-chip tag" }
                            style=format!("border-color: {};", color)
                            on:click=move |_| filter.update(|f| f.toggle_tag(&name))
                        >
                            {tag.name}
                        </button>
                    }
                }).collect_view()}
            </div>

            <div class="pool-list">
                <For
                    each=rows
                    key=|(task, depth)| (task.id.clone(), *depth, task.title.clone(), task.status, task.children.len())
                    children=move |(task, depth)| view! {
                        <PoolRow
                            task=task
                            depth=depth
                            expanded=expanded
                            on_edit=on_edit
                            on_archive=on_archive
                            on_enqueue=on_enqueue
                        />
                    }
                />
                <Show when=move || ctx.tasks.hierarchy().is_empty()>
                    <div class="pool-empty">"No tasks yet"</div>
                </Show>
            </div>
        </section>
    }
}

#[component]
fn PoolRow(
    task: TaskHierarchy,
    depth: usize,
    expanded: RwSignal<HashSet<String>>,
    on_edit: Callback<TaskHierarchy>,
    on_archive: Callback<TaskHierarchy>,
    on_enqueue: Callback<TaskHierarchy>,
) -> impl IntoView {
    let ctx = use_app_context();
    let id = task.id.clone();
    let has_children = task.has_children();
    let is_draft = task.status == TaskStatus::Draft;
    let progress = child_progress(&task);
    let indent = depth * 20;

    let selected_id = id.clone();
    let queued_id = id.clone();
    let in_queue = move || ctx.queue.contains(&queued_id);
    let row_class = {
        let in_queue = in_queue.clone();
        let status = task.status;
        move || {
            let mut c = String::from("pool-row");
            if ctx.selection.is_selected(&selected_id) { c.push_str(" selected"); }
            if in_queue() { c.push_str(" queued"); }
            if status == TaskStatus::Completed { c.push_str(" completed"); }
            if has_children { c.push_str(" parent"); }
            c
        }
    };

    let expand_id = id.clone();
    let open_id = id.clone();
    let select_task = task.clone();
    let on_row_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        ctx.selection.select(select_task.clone());
        if has_children {
            let id = expand_id.clone();
            expanded.update(|open| {
                if !open.remove(&id) {
                    open.insert(id);
                }
            });
        }
    };

    let edit_task = task.clone();
    let archive_task = task.clone();
    let enqueue_task = task.clone();

    view! {
        <div class=row_class style=format!("padding-left: {}px;", indent + 8) on:click=on_row_click>
            {has_children.then(|| view! {
                <span class="expand-icon">{move || if expanded.with(|open| open.contains(&open_id)) { "▼" } else { "▶" }}</span>
            })}
            {match progress {
                Some(percent) => view! { <span class="progress" title="Children completed">{format!("{}%", percent)}</span> }.into_any(),
                None => view! { <span class="status-icon">{status_icon(task.status)}</span> }.into_any(),
            }}
            <span class="pool-title" title=task.description.clone().unwrap_or_default()>{task.title.clone()}</span>
            <span class="pool-tags">
                {task.tags.iter().map(|t| view! { <span class="tag-badge">{t.clone()}</span> }).collect_view()}
            </span>
            <div class="pool-row-actions">
                {is_draft.then(|| view! {
                    <button
                        class="ghost"
                        title="Edit Task"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_edit.run(edit_task.clone());
                        }
                    >
                        "✎"
                    </button>
                    <button
                        class="ghost"
                        title="Archive Task"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_archive.run(archive_task.clone());
                        }
                    >
                        "🗑"
                    </button>
                })}
                {(!has_children).then(|| view! {
                    <button
                        class="ghost"
                        title="Add to Queue"
                        disabled=in_queue
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_enqueue.run(enqueue_task.clone());
                        }
                    >
                        "→"
                    </button>
                })}
            </div>
        </div>
    }
}
