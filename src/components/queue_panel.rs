//! Queue Panel Component
//!
//! Ordered task queue with drag-and-drop reordering. The first row is the
//! task in progress; only it can be completed.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;

use crate::context::{use_app_context, AppContext};
use crate::models::{QueueEntryWithTask, QueueSlot};

/// Wire drag-and-drop drops to optimistic queue moves.
/// Call once; the listeners live as long as the page.
pub fn bind_queue_dnd(ctx: AppContext) -> DndSignals {
    let dnd = create_dnd_signals();
    bind_global_mouseup(dnd, move |from, to| {
        let queue = ctx.queue;
        spawn_local(async move {
            if let Err(err) = queue.move_entry(from, to).await {
                tracing::warn!(from, to, error = %err, "queue reorder rejected");
            }
        });
    });
    dnd
}

fn after_queue_change(ctx: AppContext) {
    spawn_local(async move {
        let _ = ctx.tasks.load_hierarchy().await;
    });
}

#[component]
pub fn QueuePanel(dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let queue = ctx.queue;

    let clear_all = move |_| {
        spawn_local(async move {
            let _ = queue.clear_queue().await;
            after_queue_change(ctx);
        });
    };
    let complete_all = move |_| {
        spawn_local(async move {
            let _ = queue.complete_all().await;
            after_queue_change(ctx);
        });
    };

    let rows = move || queue.queue().into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <aside class="queue-panel">
            <div class="queue-header">
                <h2>"Queue"</h2>
                <p class="queue-count">{move || format!("Active: {} tasks", queue.queue().len())}</p>
                <div class="queue-actions">
                    <button disabled=move || queue.queue().is_empty() on:click=complete_all>"Complete all"</button>
                    <button disabled=move || queue.queue().is_empty() on:click=clear_all>"Clear"</button>
                </div>
            </div>

            {move || queue.error().map(|err| view! { <div class="queue-error">{err}</div> })}

            <Show
                when=move || !queue.queue().is_empty()
                fallback=|| view! { <div class="queue-empty">"Queue is empty"</div> }
            >
                <div class="queue-list">
                    <For
                        each=rows
                        key=|(index, entry)| (*index, entry.task_id.clone(), entry.task_title.clone())
                        children=move |(index, entry)| view! { <QueueRow dnd=dnd index=index entry=entry /> }
                    />
                </div>
            </Show>
        </aside>
    }
}

#[component]
fn QueueRow(dnd: DndSignals, index: usize, entry: QueueEntryWithTask) -> impl IntoView {
    let ctx = use_app_context();
    let queue = ctx.queue;
    let slot = QueueSlot::for_index(index);

    let on_mousedown = make_on_mousedown(dnd, index);
    let on_mouseenter = make_on_row_mouseenter(dnd, index);
    let on_mouseleave = make_on_mouseleave(dnd);

    let row_class = move || {
        let mut c = String::from("queue-row");
        if slot == QueueSlot::InProgress { c.push_str(" in-progress"); }
        if dnd.dragging_index_read.get() == Some(index) { c.push_str(" dragging"); }
        if dnd.drop_index_read.get() == Some(index) { c.push_str(" drop-target"); }
        c
    };

    let complete_id = entry.task_id.clone();
    let remove_id = entry.task_id.clone();

    view! {
        <div
            class=row_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <span class="queue-icon">{if slot == QueueSlot::InProgress { "●" } else { "○" }}</span>
            <div class="queue-body">
                <p class="queue-title" title=entry.task_description.clone().unwrap_or_default()>{entry.task_title.clone()}</p>
                <p class="queue-slot">{slot.label()}</p>
            </div>
            <div class="queue-row-actions">
                <button
                    title="Complete"
                    disabled={slot != QueueSlot::InProgress}
                    on:click=move |_| {
                        let id = complete_id.clone();
                        spawn_local(async move {
                            let _ = queue.mark_as_completed(id).await;
                            after_queue_change(ctx);
                        });
                    }
                >
                    "✓"
                </button>
                <button
                    title="Remove"
                    on:click=move |_| {
                        let id = remove_id.clone();
                        spawn_local(async move {
                            let _ = queue.return_to_draft(id).await;
                            after_queue_change(ctx);
                        });
                    }
                >
                    "×"
                </button>
            </div>
        </div>
    }
}
