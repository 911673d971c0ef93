#![allow(warnings)]
//! Task Queue Frontend Entry Point

mod models;
mod error;
mod config;
mod commands;
mod store;
mod shortcuts;
mod filter;
mod tree;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = wasm_tracing::set_as_global_default();
    mount_to_body(App);
}
