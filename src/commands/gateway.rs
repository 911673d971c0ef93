//! Command Gateway
//!
//! Single choke point for backend calls: argument encoding, the timeout
//! race, result decoding, and error surfacing through toasts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, Either, LocalBoxFuture};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::invoke;
use crate::config::AppConfig;
use crate::error::CommandError;
use crate::store::ToastStore;

/// Transport to the backend command layer
#[async_trait(?Send)]
pub trait Invoker: Send + Sync {
    /// `Err` carries the backend's error message
    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, String>;
}

/// Source of the timeout deadline
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// `window.__TAURI__.core.invoke`
pub struct TauriInvoker;

#[async_trait(?Send)]
impl Invoker for TauriInvoker {
    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, String> {
        // json_compatible: objects become plain JS objects, not Maps
        let js_args = args
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| e.to_string())?;
        let result = invoke(cmd, js_args).await.map_err(js_error_message)?;
        serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
    }
}

fn js_error_message(err: JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    js_sys::JSON::stringify(&err)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "unexpected error".to_string())
}

/// `setTimeout`-backed timer
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }
}

#[derive(Clone)]
pub struct Gateway {
    invoker: Arc<dyn Invoker>,
    timer: Arc<dyn Timer>,
    toasts: ToastStore,
    timeout: Duration,
}

impl Gateway {
    pub fn new(invoker: Arc<dyn Invoker>, timer: Arc<dyn Timer>, toasts: ToastStore, timeout: Duration) -> Self {
        Self { invoker, timer, toasts, timeout }
    }

    /// Gateway over the Tauri IPC bridge
    pub fn tauri(toasts: ToastStore, config: &AppConfig) -> Self {
        Self::new(Arc::new(TauriInvoker), Arc::new(BrowserTimer), toasts, config.command_timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Call a command that takes no arguments
    pub async fn call<R>(&self, cmd: &str) -> Result<R, CommandError>
    where
        R: DeserializeOwned,
    {
        self.dispatch(cmd, Value::Object(serde_json::Map::new())).await
    }

    /// Call a command with an argument bag
    pub async fn call_with<R, A>(&self, cmd: &str, args: &A) -> Result<R, CommandError>
    where
        R: DeserializeOwned,
        A: Serialize + ?Sized,
    {
        let args = serde_json::to_value(args).map_err(|e| {
            self.report(cmd, CommandError::Encode { command: cmd.to_string(), reason: e.to_string() })
        })?;
        self.dispatch(cmd, args).await
    }

    async fn dispatch<R>(&self, cmd: &str, args: Value) -> Result<R, CommandError>
    where
        R: DeserializeOwned,
    {
        tracing::debug!(command = cmd, "invoking command");
        let result = self.invoke_with_timeout(cmd, args).await.and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| CommandError::Decode { command: cmd.to_string(), reason: e.to_string() })
        });
        result.map_err(|err| self.report(cmd, err))
    }

    /// Whichever of "backend answers" and "deadline fires" finishes first
    /// wins. The losing backend call is dropped, not cancelled remotely.
    async fn invoke_with_timeout(&self, cmd: &str, args: Value) -> Result<Value, CommandError> {
        let call = self.invoker.invoke(cmd, args);
        let deadline = self.timer.sleep(self.timeout);
        match future::select(call, deadline).await {
            Either::Left((result, _)) => result.map_err(CommandError::Backend),
            Either::Right(((), _)) => Err(CommandError::Timeout {
                command: cmd.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }

    /// Log, toast, and hand the error back to the caller
    fn report(&self, cmd: &str, err: CommandError) -> CommandError {
        let category = err.category();
        tracing::error!(command = cmd, category = category.as_str(), error = %err, "command failed");
        self.toasts.show_error(category, err.to_string());
        err
    }
}
