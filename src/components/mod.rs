//! UI Components
//!
//! Leptos components for the task, history and tag pages.

mod confirm_button;
mod error_toasts;
mod header;
mod history_page;
mod pagination;
mod queue_panel;
mod tag_page;
mod task_form;
mod task_pool;

pub use confirm_button::ConfirmButton;
pub use error_toasts::ErrorToasts;
pub use header::Header;
pub use history_page::HistoryPage;
pub use pagination::Pagination;
pub use queue_panel::{bind_queue_dnd, QueuePanel};
pub use tag_page::TagPage;
pub use task_form::{FormMode, TaskForm};
pub use task_pool::TaskPool;
