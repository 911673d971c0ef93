//! Queue Commands
//!
//! Frontend bindings for task-queue backend commands.

use serde::de::IgnoredAny;
use serde::Serialize;

use super::Gateway;
use crate::error::CommandError;
use crate::models::{QueueEntry, QueueEntryWithTask};

// ========================
// Argument Structs
// ========================

/// Status a task takes when it leaves the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueExit {
    Draft,
    Completed,
}

#[derive(Serialize)]
struct ReqArgs<T> {
    req: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToQueueRequest<'a> {
    task_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveFromQueueRequest<'a> {
    task_id: &'a str,
    target_status: QueueExit,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQueueRequest<'a> {
    task_id: &'a str,
    new_position: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderQueueRequest<'a> {
    task_ids: &'a [String],
}

// ========================
// Commands
// ========================

impl Gateway {
    pub async fn get_task_queue(&self) -> Result<Vec<QueueEntryWithTask>, CommandError> {
        self.call("get_task_queue").await
    }

    /// Backend marks the task active
    pub async fn add_task_to_queue(&self, task_id: &str) -> Result<QueueEntry, CommandError> {
        self.call_with("add_task_to_queue", &ReqArgs { req: AddToQueueRequest { task_id } }).await
    }

    pub async fn remove_task_from_queue(&self, task_id: &str, target_status: QueueExit) -> Result<(), CommandError> {
        let req = RemoveFromQueueRequest { task_id, target_status };
        let _: IgnoredAny = self.call_with("remove_task_from_queue", &ReqArgs { req }).await?;
        Ok(())
    }

    pub async fn clear_task_queue(&self) -> Result<(), CommandError> {
        let _: IgnoredAny = self.call("clear_task_queue").await?;
        Ok(())
    }

    pub async fn complete_all_queue(&self) -> Result<(), CommandError> {
        let _: IgnoredAny = self.call("complete_all_queue").await?;
        Ok(())
    }

    pub async fn update_queue_position(&self, task_id: &str, new_position: i32) -> Result<QueueEntry, CommandError> {
        let req = UpdateQueueRequest { task_id, new_position };
        self.call_with("update_queue_position", &ReqArgs { req }).await
    }

    /// Send the complete new ordering; the backend validates it and assigns positions
    pub async fn reorder_task_queue(&self, task_ids: &[String]) -> Result<Vec<QueueEntry>, CommandError> {
        self.call_with("reorder_task_queue", &ReqArgs { req: ReorderQueueRequest { task_ids } }).await
    }
}
