//! Task Queue Frontend App
//!
//! Page switcher with the task pool and queue side by side.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{DuplicateTaskRequest, Gateway};
use crate::components::{
    bind_queue_dnd, ErrorToasts, FormMode, Header, HistoryPage, QueuePanel, TagPage, TaskForm, TaskPool,
};
use crate::config::AppConfig;
use crate::context::{AppContext, Page};
use crate::models::{TaskHierarchy, TaskStatus};
use crate::shortcuts::{bind_shortcuts, ShortcutActions};
use crate::store::ToastStore;

/// Task actions shared by the keyboard shortcuts and the pool buttons
#[derive(Clone, Copy)]
struct TaskActions {
    ctx: AppContext,
    form: RwSignal<FormMode>,
    search_ref: NodeRef<leptos::html::Input>,
}

impl ShortcutActions for TaskActions {
    fn create_task(&self) {
        self.form.set(FormMode::Create);
    }

    fn edit_task(&self, task: &TaskHierarchy) {
        self.form.set(FormMode::Edit(task.clone()));
    }

    fn archive_task(&self, task: &TaskHierarchy) {
        let ctx = self.ctx;
        let id = task.id.clone();
        spawn_local(async move {
            if ctx.tasks.delete_task(id).await.is_ok() {
                ctx.reload_task_page();
            }
        });
    }

    fn add_to_queue(&self, task: &TaskHierarchy) {
        let ctx = self.ctx;
        let id = task.id.clone();
        spawn_local(async move {
            // the queue store reloads itself either way
            let _ = ctx.queue.add_to_queue(id).await;
            let _ = ctx.tasks.load_hierarchy().await;
        });
    }

    fn duplicate_task(&self, task: &TaskHierarchy) {
        let ctx = self.ctx;
        let request = DuplicateTaskRequest { task_id: task.id.clone(), new_title: None };
        spawn_local(async move {
            if ctx.tasks.duplicate_task(request).await.is_ok() {
                ctx.reload_task_page();
            }
        });
    }

    fn focus_search(&self) {
        if let Some(input) = self.search_ref.get_untracked() {
            let _ = input.focus();
        }
    }

    fn dismiss(&self) {
        self.form.set(FormMode::Closed);
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    let toasts = ToastStore::new();
    let gateway = Gateway::tauri(toasts, &config);

    let ctx = AppContext::new(config, toasts, gateway);
    provide_context(ctx);

    let form = RwSignal::new(FormMode::Closed);
    let search_ref: NodeRef<leptos::html::Input> = NodeRef::new();
    let actions = TaskActions { ctx, form, search_ref };

    // Document listeners, bound once for the app lifetime
    let dnd = bind_queue_dnd(ctx);
    bind_shortcuts(
        ctx.selection,
        move || ctx.page.get_untracked().shortcut_scope(),
        move || form.with_untracked(|mode| mode.is_open()),
        actions,
    );

    tracing::info!(
        command_timeout_ms = config.command_timeout_ms,
        page_size = config.page_size,
        "task queue frontend starting"
    );
    ctx.reload_task_page();
    ctx.reload_tags();

    // Returning to the task page refreshes it
    Effect::new(move |previous: Option<Page>| {
        let page = ctx.page.get();
        if previous.is_some_and(|p| p != page) && page == Page::Tasks {
            ctx.reload_task_page();
        }
        page
    });

    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Tasks => view! {
                        <div class="task-page">
                            <TaskPool
                                search_ref=search_ref
                                on_create=Callback::new(move |_: ()| actions.create_task())
                                on_edit=Callback::new(move |task: TaskHierarchy| actions.edit_task(&task))
                                on_archive=Callback::new(move |task: TaskHierarchy| actions.archive_task(&task))
                                on_enqueue=Callback::new(move |task: TaskHierarchy| actions.add_to_queue(&task))
                            />
                            <QueuePanel dnd=dnd />
                            <TaskForm mode=form />
                        </div>
                    }.into_any(),
                    Page::Completed => view! { <HistoryPage status=TaskStatus::Completed search_ref=search_ref /> }.into_any(),
                    Page::Archived => view! { <HistoryPage status=TaskStatus::Archived search_ref=search_ref /> }.into_any(),
                    Page::Tags => view! { <TagPage search_ref=search_ref /> }.into_any(),
                }}
            </main>
            <ErrorToasts />
        </div>
    }
}
