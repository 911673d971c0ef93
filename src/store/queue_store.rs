//! Queue Store
//!
//! Cached task queue. Every mutation is one command followed by a full
//! reload, so the cache always ends up as the backend's answer.

use std::future::Future;

use leptos::prelude::*;
use leptos_dragdrop::reordered;
use reactive_stores::Store;

use crate::commands::{Gateway, QueueExit};
use crate::error::CommandError;
use crate::models::{is_dense_ordering, QueueEntryWithTask};

#[derive(Clone, Debug, Default, Store)]
pub struct QueueState {
    pub queue: Vec<QueueEntryWithTask>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
pub struct QueueStore {
    state: Store<QueueState>,
    gateway: StoredValue<Gateway>,
}

impl QueueStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            state: Store::new(QueueState::default()),
            gateway: StoredValue::new(gateway),
        }
    }

    pub fn state(&self) -> Store<QueueState> {
        self.state
    }

    pub fn queue(&self) -> Vec<QueueEntryWithTask> {
        self.state.queue().get()
    }

    pub fn queue_untracked(&self) -> Vec<QueueEntryWithTask> {
        self.state.queue().get_untracked()
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.state.queue().with(|queue| queue.iter().any(|e| e.task_id == task_id))
    }

    pub fn loading(&self) -> bool {
        self.state.loading().get()
    }

    pub fn error(&self) -> Option<String> {
        self.state.error().get()
    }

    pub fn clear_error(&self) {
        self.state.error().set(None);
    }

    async fn run<T, F, Fut>(&self, op: F) -> Result<T, CommandError>
    where
        F: FnOnce(Gateway) -> Fut,
        Fut: Future<Output = Result<T, CommandError>>,
    {
        self.state.loading().set(true);
        self.state.error().set(None);
        let result = op(self.gateway.get_value()).await;
        if let Err(err) = &result {
            self.state.error().set(Some(err.to_string()));
        }
        self.state.loading().set(false);
        result
    }

    /// Run one command, then reload whether it succeeded or not.
    /// `loading` stays set across both calls. The command's error wins over
    /// the reload's; a failed reload after a successful command is returned.
    async fn mutate<T, F, Fut>(&self, op: F) -> Result<T, CommandError>
    where
        F: FnOnce(Gateway) -> Fut,
        Fut: Future<Output = Result<T, CommandError>>,
    {
        self.state.loading().set(true);
        self.state.error().set(None);
        let gateway = self.gateway.get_value();
        let result = op(gateway.clone()).await;
        let reloaded = gateway.get_task_queue().await.map(|queue| self.publish(queue));
        let outcome = match (result, reloaded) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(reload_err)) => Err(reload_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(reload_err)) => {
                tracing::warn!(error = %reload_err, "queue reload after failed mutation also failed");
                Err(err)
            }
        };
        if let Err(err) = &outcome {
            self.state.error().set(Some(err.to_string()));
        }
        self.state.loading().set(false);
        outcome
    }

    fn publish(&self, queue: Vec<QueueEntryWithTask>) {
        if !is_dense_ordering(&queue) {
            let positions: Vec<i32> = queue.iter().map(|e| e.position).collect();
            tracing::warn!(?positions, "queue positions are not a dense 0..n ordering");
        }
        tracing::debug!(len = queue.len(), "queue loaded");
        self.state.queue().set(queue);
    }

    pub async fn load_queue(&self) -> Result<(), CommandError> {
        let queue = self.run(|gw| async move { gw.get_task_queue().await }).await?;
        self.publish(queue);
        Ok(())
    }

    pub async fn add_to_queue(&self, task_id: String) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.add_task_to_queue(&task_id).await.map(|_| ()) }).await
    }

    pub async fn return_to_draft(&self, task_id: String) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.remove_task_from_queue(&task_id, QueueExit::Draft).await }).await
    }

    pub async fn mark_as_completed(&self, task_id: String) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.remove_task_from_queue(&task_id, QueueExit::Completed).await }).await
    }

    /// Every queued task returns to draft
    pub async fn clear_queue(&self) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.clear_task_queue().await }).await
    }

    pub async fn complete_all(&self) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.complete_all_queue().await }).await
    }

    pub async fn update_queue_position(&self, task_id: String, new_position: i32) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.update_queue_position(&task_id, new_position).await.map(|_| ()) }).await
    }

    /// Send a complete ordering of task ids
    pub async fn reorder_queue(&self, task_ids: Vec<String>) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.reorder_task_queue(&task_ids).await.map(|_| ()) }).await
    }

    // ========================
    // Optimistic Reorder
    // ========================

    /// Splice the cached queue in place and return the new id order.
    /// `None` for no-op or out-of-range moves.
    pub fn apply_local_move(&self, from: usize, to: usize) -> Option<Vec<String>> {
        let moved = self.state.queue().with_untracked(|queue| reordered(queue, from, to))?;
        let ids = moved.iter().map(|e| e.task_id.clone()).collect();
        self.state.queue().set(moved);
        Some(ids)
    }

    /// Show the move immediately, then let the backend decide. On failure the
    /// reload inside `reorder_queue` erases the local guess.
    pub async fn move_entry(&self, from: usize, to: usize) -> Result<(), CommandError> {
        let Some(ids) = self.apply_local_move(from, to) else {
            return Ok(());
        };
        tracing::debug!(from, to, "reordering queue");
        self.reorder_queue(ids).await
    }
}
