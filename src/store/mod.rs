//! Application State Stores
//!
//! Explicit state containers built once in `App` and handed down through
//! context. Each wraps a `reactive_stores::Store` for field-level reactivity.

mod queue_store;
mod selection;
mod tag_store;
mod task_store;
mod toast;

pub use queue_store::*;
pub use selection::*;
pub use tag_store::*;
pub use task_store::*;
pub use toast::*;
