//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.
//! Every call goes through [`Gateway`], which adds the timeout race and
//! error toasts.

mod gateway;
mod queue;
mod tag;
mod task;

#[cfg(test)]
pub mod fake;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use gateway::*;
pub use queue::*;
pub use tag::*;
pub use task::*;
