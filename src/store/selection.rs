//! Task Selection
//!
//! The task targeted by keyboard shortcuts.

use leptos::prelude::*;

use crate::models::TaskHierarchy;

#[derive(Clone, Copy)]
pub struct SelectionStore {
    selected: RwSignal<Option<TaskHierarchy>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self { selected: RwSignal::new(None) }
    }

    pub fn select(&self, task: TaskHierarchy) {
        self.selected.set(Some(task));
    }

    pub fn clear(&self) {
        self.selected.set(None);
    }

    pub fn selected(&self) -> Option<TaskHierarchy> {
        self.selected.get()
    }

    pub fn selected_untracked(&self) -> Option<TaskHierarchy> {
        self.selected.get_untracked()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected.with(|task| task.as_ref().map(|t| t.id.clone()))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.with(|task| task.as_ref().is_some_and(|t| t.id == id))
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}
