//! Application Context
//!
//! Stores and navigation provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::Gateway;
use crate::config::AppConfig;
use crate::shortcuts::ShortcutScope;
use crate::store::{QueueStore, SelectionStore, TagStore, TaskStore, ToastStore};

/// Top-level pages, switched by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Tasks,
    Completed,
    Archived,
    Tags,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Tasks, Page::Completed, Page::Archived, Page::Tags];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Tasks => "Tasks",
            Page::Completed => "Completed",
            Page::Archived => "Archived",
            Page::Tags => "Tags",
        }
    }

    pub fn shortcut_scope(&self) -> ShortcutScope {
        match self {
            Page::Tasks => ShortcutScope::TaskList,
            Page::Completed | Page::Archived | Page::Tags => ShortcutScope::SearchOnly,
        }
    }
}

/// App-wide stores provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: AppConfig,
    pub toasts: ToastStore,
    pub tasks: TaskStore,
    pub queue: QueueStore,
    pub tags: TagStore,
    pub selection: SelectionStore,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
}

impl AppContext {
    pub fn new(config: AppConfig, toasts: ToastStore, gateway: Gateway) -> Self {
        let (page, set_page) = signal(Page::Tasks);
        Self {
            config,
            toasts,
            tasks: TaskStore::new(gateway.clone()),
            queue: QueueStore::new(gateway.clone()),
            tags: TagStore::new(gateway),
            selection: SelectionStore::new(),
            page,
            set_page,
        }
    }

    pub fn navigate(&self, page: Page) {
        self.selection.clear();
        self.set_page.set(page);
    }

    /// Reload everything the task page shows.
    /// Failures are already toasted by the gateway.
    pub fn reload_task_page(&self) {
        let ctx = *self;
        spawn_local(async move {
            let _ = ctx.tasks.load_hierarchy().await;
            let _ = ctx.queue.load_queue().await;
        });
    }

    pub fn reload_tags(&self) {
        let tags = self.tags;
        spawn_local(async move {
            let _ = tags.load_tags().await;
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
