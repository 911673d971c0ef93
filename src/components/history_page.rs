//! History Page Component
//!
//! Completed or archived tasks grouped by day, paginated. Archived tasks
//! can be restored or deleted for good.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{ListTasksPaginatedParams, SearchTasksQuery};
use crate::components::{ConfirmButton, Pagination};
use crate::context::use_app_context;
use crate::filter::{group_by_date, Paging};
use crate::models::{Task, TaskStatus};

#[component]
pub fn HistoryPage(status: TaskStatus, search_ref: NodeRef<leptos::html::Input>) -> impl IntoView {
    let ctx = use_app_context();
    let page_size = ctx.config.page_size;

    let (query, set_query) = signal(String::new());
    let (rows, set_rows) = signal(Vec::<Task>::new());
    let (loading, set_loading) = signal(true);
    let paging = RwSignal::new(Paging::new(page_size));

    // Keyword search goes through search_tasks and pages in memory
    let load = move |page: usize| {
        let q = query.get_untracked().trim().to_string();
        let mut next = paging.get_untracked();
        next.page = page.max(1);
        set_loading.set(true);
        spawn_local(async move {
            let result = if q.is_empty() {
                let params = ListTasksPaginatedParams {
                    status: Some(vec![status]),
                    limit: i64::try_from(next.page_size).ok(),
                    offset: i64::try_from(next.offset()).ok(),
                };
                ctx.tasks.fetch_page(params).await.map(|resp| {
                    next.total = usize::try_from(resp.total).unwrap_or(0);
                    resp.tasks
                })
            } else {
                let query = SearchTasksQuery { q: Some(q), status: Some(status), tags: None };
                ctx.tasks.search(query).await.map(|hits| {
                    next.total = hits.len();
                    next.slice(&hits).to_vec()
                })
            };
            if let Ok(tasks) = result {
                set_rows.set(tasks);
                paging.set(next);
            }
            set_loading.set(false);
        });
    };

    load(1);

    let reload_current = move || load(paging.get_untracked().page);

    let (title, placeholder) = match status {
        TaskStatus::Archived => ("Archived Tasks", "Search archived tasks..."),
        _ => ("Completed Tasks", "Search completed tasks..."),
    };
    let archived = status == TaskStatus::Archived;

    view! {
        <section class="history-page">
            <div class="history-header">
                <h1>{title}</h1>
                <div class="history-search">
                    <input
                        type="text"
                        placeholder=placeholder
                        node_ref=search_ref
                        prop:value=move || query.get()
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                load(1);
                            }
                        }
                    />
                    <button on:click=move |_| load(1)>"Search"</button>
                </div>
            </div>

            <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                <div class="history-empty">"Nothing here yet"</div>
            </Show>

            <div class="history-groups">
                {move || group_by_date(&rows.get()).into_iter().map(|group| view! {
                    <div class="date-group">
                        <h3 class="date-label">{group.label()}</h3>
                        {group.tasks.into_iter().map(|task| view! {
                            <HistoryRow task=task archived=archived on_changed=Callback::new(move |_: ()| reload_current()) />
                        }).collect_view()}
                    </div>
                }).collect_view()}
            </div>

            <Pagination paging=paging on_change=Callback::new(move |page: usize| load(page)) />
        </section>
    }
}

#[component]
fn HistoryRow(task: Task, archived: bool, on_changed: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let restore_id = task.id.clone();
    let delete_id = task.id.clone();
    let time = chrono::DateTime::parse_from_rfc3339(&task.updated_at)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_default();

    view! {
        <div class="history-row">
            <span class="history-time">{time}</span>
            <div class="history-body">
                <span class="history-title">{task.title.clone()}</span>
                {task.parent_title.clone().map(|parent| view! { <span class="history-parent">{parent}</span> })}
                <span class="pool-tags">
                    {task.tags.iter().map(|t| view! { <span class="tag-badge">{t.clone()}</span> }).collect_view()}
                </span>
            </div>
            {archived.then(|| view! {
                <div class="history-actions">
                    <button on:click=move |_| {
                        let id = restore_id.clone();
                        spawn_local(async move {
                            if ctx.tasks.restore_task(id).await.is_ok() {
                                on_changed.run(());
                            }
                        });
                    }>
                        "Restore"
                    </button>
                    <ConfirmButton
                        label="Delete"
                        button_class="danger"
                        prompt="Delete permanently?"
                        on_confirm=Callback::new(move |_: ()| {
                            let id = delete_id.clone();
                            spawn_local(async move {
                                if ctx.tasks.delete_task_permanently(id).await.is_ok() {
                                    on_changed.run(());
                                }
                            });
                        })
                    />
                </div>
            })}
        </div>
    }
}
