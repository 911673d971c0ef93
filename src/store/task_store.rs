//! Task Store
//!
//! Cached task list and hierarchy. Mutations return the backend's answer
//! and leave the cache alone; callers reload afterwards.

use std::future::Future;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::{
    CreateTaskRequest, DuplicateTaskRequest, Gateway, ListTasksPaginatedParams, SearchTasksQuery, UpdateTaskRequest,
};
use crate::error::CommandError;
use crate::models::{PaginatedTaskResponse, Task, TaskHierarchy};

#[derive(Clone, Debug, Default, Store)]
pub struct TaskState {
    pub tasks: Vec<Task>,
    pub hierarchy: Vec<TaskHierarchy>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
pub struct TaskStore {
    state: Store<TaskState>,
    gateway: StoredValue<Gateway>,
}

impl TaskStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            state: Store::new(TaskState::default()),
            gateway: StoredValue::new(gateway),
        }
    }

    pub fn state(&self) -> Store<TaskState> {
        self.state
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.tasks().get()
    }

    pub fn hierarchy(&self) -> Vec<TaskHierarchy> {
        self.state.hierarchy().get()
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

    // ========================
    // Loads
    // ========================

    /// Draft and active tasks
    pub async fn load_tasks(&self) -> Result<(), CommandError> {
        let tasks = self.run(|gw| async move { gw.list_tasks(None).await }).await?;
        self.state.tasks().set(tasks);
        Ok(())
    }

    pub async fn load_hierarchy(&self) -> Result<(), CommandError> {
        let hierarchy = self.run(|gw| async move { gw.get_task_hierarchy().await }).await?;
        self.state.hierarchy().set(hierarchy);
        Ok(())
    }

    /// One page of a status history; not cached
    pub async fn fetch_page(&self, params: ListTasksPaginatedParams) -> Result<PaginatedTaskResponse, CommandError> {
        self.run(|gw| async move { gw.list_tasks_paginated(&params).await }).await
    }

    /// Not cached
    pub async fn search(&self, query: SearchTasksQuery) -> Result<Vec<Task>, CommandError> {
        self.run(|gw| async move { gw.search_tasks(&query).await }).await
    }

    pub async fn search_ids(&self, query: SearchTasksQuery) -> Result<Vec<String>, CommandError> {
        self.run(|gw| async move { gw.search_task_ids(&query).await }).await
    }

    // ========================
    // Mutations
    // ========================

    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, CommandError> {
        self.run(|gw| async move { gw.create_task(&request).await }).await
    }

    pub async fn get_task(&self, id: String) -> Result<Task, CommandError> {
        self.run(|gw| async move { gw.get_task(&id).await }).await
    }

    pub async fn update_task(&self, id: String, request: UpdateTaskRequest) -> Result<Task, CommandError> {
        self.run(|gw| async move { gw.update_task(&id, &request).await }).await
    }

    /// Archive a draft task
    pub async fn delete_task(&self, id: String) -> Result<(), CommandError> {
        self.run(|gw| async move { gw.delete_task(&id).await }).await
    }

    pub async fn duplicate_task(&self, request: DuplicateTaskRequest) -> Result<Task, CommandError> {
        self.run(|gw| async move { gw.duplicate_task(&request).await }).await
    }

    pub async fn restore_task(&self, id: String) -> Result<Task, CommandError> {
        self.run(|gw| async move { gw.restore_task(&id).await }).await
    }

    pub async fn delete_task_permanently(&self, id: String) -> Result<(), CommandError> {
        self.run(|gw| async move { gw.delete_task_permanently(&id).await }).await
    }
}
