//! Task Commands
//!
//! Frontend bindings for task-related backend commands.

use serde::de::IgnoredAny;
use serde::Serialize;

use super::Gateway;
use crate::error::CommandError;
use crate::models::{PaginatedTaskResponse, Task, TaskHierarchy, TaskStatus};

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Only the fields that are `Some` are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Children of a parent task are duplicated along with it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateTaskRequest {
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListTasksPaginatedParams {
    pub status: Option<Vec<TaskStatus>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Keyword / status / tag filters; tags match with OR
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchTasksQuery {
    pub q: Option<String>,
    pub status: Option<TaskStatus>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize)]
struct ReqArgs<'a, T> {
    req: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskIdArgs<'a> {
    task_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTaskArgs<'a> {
    task_id: &'a str,
    req: &'a UpdateTaskRequest,
}

#[derive(Serialize)]
struct ListTasksArgs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a [TaskStatus]>,
}

#[derive(Serialize)]
struct PaginatedArgs<'a> {
    params: &'a ListTasksPaginatedParams,
}

// ========================
// Commands
// ========================

impl Gateway {
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task, CommandError> {
        self.call_with("create_task", &ReqArgs { req: request }).await
    }

    pub async fn duplicate_task(&self, request: &DuplicateTaskRequest) -> Result<Task, CommandError> {
        self.call_with("duplicate_task", &ReqArgs { req: request }).await
    }

    pub async fn get_task(&self, task_id: &str) -> Result<Task, CommandError> {
        self.call_with("get_task", &TaskIdArgs { task_id }).await
    }

    pub async fn update_task(&self, task_id: &str, request: &UpdateTaskRequest) -> Result<Task, CommandError> {
        self.call_with("update_task", &UpdateTaskArgs { task_id, req: request }).await
    }

    /// Soft delete: draft -> archived
    pub async fn delete_task(&self, task_id: &str) -> Result<(), CommandError> {
        let _: IgnoredAny = self.call_with("delete_task", &TaskIdArgs { task_id }).await?;
        Ok(())
    }

    /// Hard delete, archived tasks only
    pub async fn delete_task_permanently(&self, task_id: &str) -> Result<(), CommandError> {
        let _: IgnoredAny = self.call_with("delete_task_permanently", &TaskIdArgs { task_id }).await?;
        Ok(())
    }

    /// archived -> draft
    pub async fn restore_task(&self, task_id: &str) -> Result<Task, CommandError> {
        self.call_with("restore_task", &TaskIdArgs { task_id }).await
    }

    /// `None` lets the backend apply its default (draft + active)
    pub async fn list_tasks(&self, status: Option<&[TaskStatus]>) -> Result<Vec<Task>, CommandError> {
        self.call_with("list_tasks", &ListTasksArgs { status }).await
    }

    pub async fn list_tasks_paginated(&self, params: &ListTasksPaginatedParams) -> Result<PaginatedTaskResponse, CommandError> {
        self.call_with("list_tasks_paginated", &PaginatedArgs { params }).await
    }

    pub async fn get_task_hierarchy(&self) -> Result<Vec<TaskHierarchy>, CommandError> {
        self.call("get_task_hierarchy").await
    }

    pub async fn search_tasks(&self, query: &SearchTasksQuery) -> Result<Vec<Task>, CommandError> {
        self.call_with("search_tasks", query).await
    }

    pub async fn search_task_ids(&self, query: &SearchTasksQuery) -> Result<Vec<String>, CommandError> {
        self.call_with("search_task_ids", query).await
    }
}
