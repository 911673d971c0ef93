//! Error Toasts
//!
//! Visible error notifications published by the command gateway.

use chrono::{DateTime, Local};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::error::ErrorCategory;

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: String,
    pub category: ErrorCategory,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Clone, Debug, Default, Store)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    pub next_id: u64,
}

/// Handle to the toast list. Dismissal timing belongs to the view.
#[derive(Clone, Copy)]
pub struct ToastStore {
    state: Store<ToastState>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self { state: Store::new(ToastState::default()) }
    }

    /// Append an error toast, returning its id
    pub fn show_error(&self, category: ErrorCategory, message: impl Into<String>) -> String {
        let next = self.state.next_id().get_untracked() + 1;
        self.state.next_id().set(next);
        let id = format!("toast-{}", next);
        self.state.toasts().write().push(Toast {
            id: id.clone(),
            category,
            message: message.into(),
            timestamp: Local::now(),
        });
        id
    }

    pub fn dismiss(&self, id: &str) {
        self.state.toasts().write().retain(|toast| toast.id != id);
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.toasts().get()
    }

    pub fn toasts_untracked(&self) -> Vec<Toast> {
        self.state.toasts().get_untracked()
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}
