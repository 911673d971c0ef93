//! In-memory backend for tests
//!
//! Implements [`Invoker`] over a small task/queue/tag model with the same
//! command names and argument bags as the real backend.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, LocalBoxFuture};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Gateway, Invoker, Timer};
use crate::config::AppConfig;
use crate::models::{QueueEntry, QueueEntryWithTask, Tag, Task, TaskHierarchy, TaskStatus};
use crate::store::ToastStore;

const TIMESTAMP: &str = "2025-01-01T00:00:00Z";

#[derive(Default)]
struct FakeState {
    tasks: Vec<Task>,
    queue: Vec<QueueEntry>,
    tags: Vec<Tag>,
    calls: Vec<(String, Value)>,
    failures: HashMap<String, VecDeque<String>>,
    hanging: HashSet<String>,
    next_id: u32,
}

enum Outcome {
    Hang,
    Fail(String),
    Run,
}

type CallObserver = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
    observers: Mutex<Vec<CallObserver>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Gateway over this backend with a timer that never fires
    pub fn gateway(backend: &Arc<Self>) -> (Gateway, ToastStore) {
        let toasts = ToastStore::new();
        let gateway = Gateway::new(backend.clone(), Arc::new(NeverTimer), toasts, AppConfig::default().command_timeout());
        (gateway, toasts)
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_task(&self, id: &str, title: &str, status: TaskStatus) {
        self.lock().tasks.push(make_task(id, title, status, None));
    }

    pub fn add_child(&self, id: &str, title: &str, parent_id: &str) {
        let mut state = self.lock();
        let parent_title = state.tasks.iter().find(|t| t.id == parent_id).map(|t| t.title.clone());
        let mut child = make_task(id, title, TaskStatus::Draft, Some(parent_id.to_string()));
        child.parent_title = parent_title;
        if let Some(parent) = state.tasks.iter_mut().find(|t| t.id == parent_id) {
            parent.children_ids.push(id.to_string());
        }
        state.tasks.push(child);
    }

    pub fn add_tag(&self, id: &str, name: &str, color: Option<&str>) {
        self.lock().tags.push(Tag {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            usage_count: 0,
            created_at: TIMESTAMP.to_string(),
        });
    }

    /// Seed the queue directly, bypassing the command log
    pub fn enqueue(&self, task_id: &str) {
        let mut state = self.lock();
        add_to_queue(&mut state, task_id).ok();
    }

    /// Overwrite a stored position, e.g. to produce a non-dense queue
    pub fn set_position(&self, task_id: &str, position: i32) {
        let mut state = self.lock();
        if let Some(entry) = state.queue.iter_mut().find(|e| e.task_id == task_id) {
            entry.position = position;
        }
    }

    /// The next call of `cmd` fails with `message`
    pub fn fail_next(&self, cmd: &str, message: &str) {
        self.lock().failures.entry(cmd.to_string()).or_default().push_back(message.to_string());
    }

    /// Calls of `cmd` never answer
    pub fn hang(&self, cmd: &str) {
        self.lock().hanging.insert(cmd.to_string());
    }

    /// Runs before each command is handled, outside the state lock
    pub fn on_call(&self, observer: impl Fn(&str) + Send + Sync + 'static) {
        if let Ok(mut observers) = self.observers.lock() {
            observers.push(Box::new(observer));
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.iter().map(|(cmd, _)| cmd.clone()).collect()
    }

    pub fn args_of(&self, cmd: &str) -> Option<Value> {
        self.lock().calls.iter().rev().find(|(c, _)| c == cmd).map(|(_, args)| args.clone())
    }

    pub fn queue_ids(&self) -> Vec<String> {
        let state = self.lock();
        sorted_queue(&state).into_iter().map(|e| e.task_id).collect()
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.lock().tags.clone()
    }

    fn prepare(&self, cmd: &str, args: &Value) -> Outcome {
        let mut state = self.lock();
        state.calls.push((cmd.to_string(), args.clone()));
        if state.hanging.contains(cmd) {
            return Outcome::Hang;
        }
        match state.failures.get_mut(cmd).and_then(VecDeque::pop_front) {
            Some(message) => Outcome::Fail(message),
            None => Outcome::Run,
        }
    }
}

#[async_trait(?Send)]
impl Invoker for FakeBackend {
    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, String> {
        if let Ok(observers) = self.observers.lock() {
            for observer in observers.iter() {
                observer(cmd);
            }
        }
        match self.prepare(cmd, &args) {
            Outcome::Hang => future::pending().await,
            Outcome::Fail(message) => Err(message),
            Outcome::Run => handle(&mut self.lock(), cmd, &args),
        }
    }
}

/// Fires immediately and records what was asked for
#[derive(Default)]
pub struct ImmediateTimer {
    requested: Mutex<Vec<Duration>>,
}

impl ImmediateTimer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Timer for ImmediateTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(duration);
        }
        Box::pin(future::ready(()))
    }
}

pub struct NeverTimer;

impl Timer for NeverTimer {
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(future::pending())
    }
}

// ========================
// Command Handlers
// ========================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskIdArg {
    task_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagIdArg {
    tag_id: String,
}

#[derive(Deserialize)]
struct ReqArg<T> {
    req: T,
}

#[derive(Deserialize)]
struct RequestArg<T> {
    request: T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveReq {
    task_id: String,
    target_status: TaskStatus,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PositionReq {
    task_id: String,
    new_position: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderReq {
    task_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateReq {
    title: String,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    parent_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    task_id: String,
    req: UpdateReq,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateReq {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    tags: Option<Vec<String>>,
    parent_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DuplicateReq {
    task_id: String,
    new_title: Option<String>,
}

#[derive(Deserialize)]
struct StatusArg {
    status: Option<Vec<TaskStatus>>,
}

#[derive(Deserialize)]
struct Paginated {
    params: PageParams,
}

#[derive(Deserialize)]
struct PageParams {
    status: Option<Vec<TaskStatus>>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Deserialize)]
struct SearchArgs {
    q: Option<String>,
    status: Option<TaskStatus>,
    tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct TagReq {
    name: Option<String>,
    color: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTagArgs {
    tag_id: String,
    request: TagReq,
}

fn parse<T: DeserializeOwned>(args: &Value) -> Result<T, String> {
    serde_json::from_value(args.clone()).map_err(|e| format!("invalid arguments: {}", e))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

fn handle(state: &mut FakeState, cmd: &str, args: &Value) -> Result<Value, String> {
    match cmd {
        // Queue
        "get_task_queue" => to_value(&queue_with_tasks(state)),
        "add_task_to_queue" => {
            let ReqArg { req } = parse::<ReqArg<TaskIdArg>>(args)?;
            to_value(&add_to_queue(state, &req.task_id)?)
        }
        "remove_task_from_queue" => {
            let ReqArg { req } = parse::<ReqArg<RemoveReq>>(args)?;
            if !matches!(req.target_status, TaskStatus::Draft | TaskStatus::Completed) {
                return Err("invalid target status".to_string());
            }
            let before = state.queue.len();
            state.queue.retain(|e| e.task_id != req.task_id);
            if state.queue.len() == before {
                return Err("Task is not in the queue".to_string());
            }
            renumber(state);
            set_status(state, &req.task_id, req.target_status);
            Ok(Value::Null)
        }
        "clear_task_queue" => {
            drain_queue(state, TaskStatus::Draft);
            Ok(Value::Null)
        }
        "complete_all_queue" => {
            let count = state.queue.len();
            drain_queue(state, TaskStatus::Completed);
            Ok(json!(count))
        }
        "update_queue_position" => {
            let ReqArg { req } = parse::<ReqArg<PositionReq>>(args)?;
            let mut ids: Vec<String> = sorted_queue(state).into_iter().map(|e| e.task_id).collect();
            let from = ids.iter().position(|id| *id == req.task_id).ok_or("Task is not in the queue")?;
            let to = usize::try_from(req.new_position).map_err(|_| "invalid position".to_string())?;
            if to >= ids.len() {
                return Err("invalid position".to_string());
            }
            let id = ids.remove(from);
            ids.insert(to, id);
            apply_order(state, &ids);
            let entry = state.queue.iter().find(|e| e.task_id == req.task_id).cloned();
            to_value(&entry)
        }
        "reorder_task_queue" => {
            let ReqArg { req } = parse::<ReqArg<ReorderReq>>(args)?;
            let mut current: Vec<&str> = state.queue.iter().map(|e| e.task_id.as_str()).collect();
            let mut proposed: Vec<&str> = req.task_ids.iter().map(String::as_str).collect();
            current.sort_unstable();
            proposed.sort_unstable();
            if current != proposed {
                return Err("invalid queue ordering: task ids do not match the queue".to_string());
            }
            apply_order(state, &req.task_ids);
            to_value(&sorted_queue(state))
        }

        // Tasks
        "list_tasks" => {
            let StatusArg { status } = parse(args)?;
            let status = status.unwrap_or_else(|| vec![TaskStatus::Draft, TaskStatus::Active]);
            let tasks: Vec<&Task> = state.tasks.iter().filter(|t| status.contains(&t.status)).collect();
            to_value(&tasks)
        }
        "list_tasks_paginated" => {
            let Paginated { params } = parse(args)?;
            let matching: Vec<&Task> = state
                .tasks
                .iter()
                .filter(|t| params.status.as_ref().map_or(true, |s| s.contains(&t.status)))
                .collect();
            let offset = usize::try_from(params.offset.unwrap_or(0)).unwrap_or(0);
            let limit = params.limit.and_then(|l| usize::try_from(l).ok()).unwrap_or(usize::MAX);
            let page: Vec<&Task> = matching.iter().skip(offset).take(limit).copied().collect();
            Ok(json!({ "tasks": to_value(&page)?, "total": matching.len() }))
        }
        "get_task_hierarchy" => to_value(&hierarchy(state)),
        "search_tasks" | "search_task_ids" => {
            let query: SearchArgs = parse(args)?;
            let matches: Vec<&Task> = state.tasks.iter().filter(|t| matches_search(t, &query)).collect();
            if cmd == "search_tasks" {
                to_value(&matches)
            } else {
                to_value(&matches.iter().map(|t| t.id.as_str()).collect::<Vec<_>>())
            }
        }
        "get_task" => {
            let TaskIdArg { task_id } = parse(args)?;
            to_value(find_task(state, &task_id)?)
        }
        "create_task" => {
            let ReqArg { req } = parse::<ReqArg<CreateReq>>(args)?;
            if req.title.trim().is_empty() {
                return Err("title is required".to_string());
            }
            let id = fresh_id(state, "task");
            let mut task = make_task(&id, &req.title, TaskStatus::Draft, req.parent_id.clone());
            task.description = req.description;
            task.tags = req.tags;
            if let Some(parent_id) = &req.parent_id {
                let parent = state.tasks.iter_mut().find(|t| t.id == *parent_id).ok_or("Parent task not found")?;
                parent.children_ids.push(id.clone());
                task.parent_title = Some(parent.title.clone());
            }
            state.tasks.push(task.clone());
            to_value(&task)
        }
        "update_task" => {
            let UpdateArgs { task_id, req } = parse(args)?;
            let task = state.tasks.iter_mut().find(|t| t.id == task_id).ok_or("Task not found")?;
            if let Some(title) = req.title {
                task.title = title;
            }
            if req.description.is_some() {
                task.description = req.description;
            }
            if let Some(status) = req.status {
                task.status = status;
            }
            if let Some(tags) = req.tags {
                task.tags = tags;
            }
            if req.parent_id.is_some() {
                task.parent_id = req.parent_id;
            }
            let task = task.clone();
            to_value(&task)
        }
        "delete_task" => {
            let TaskIdArg { task_id } = parse(args)?;
            let task = find_task(state, &task_id)?;
            if task.status != TaskStatus::Draft {
                return Err("invalid status: only draft tasks can be archived".to_string());
            }
            set_status(state, &task_id, TaskStatus::Archived);
            Ok(Value::Null)
        }
        "delete_task_permanently" => {
            let TaskIdArg { task_id } = parse(args)?;
            if find_task(state, &task_id)?.status != TaskStatus::Archived {
                return Err("invalid status: only archived tasks can be deleted".to_string());
            }
            state.tasks.retain(|t| t.id != task_id);
            Ok(Value::Null)
        }
        "restore_task" => {
            let TaskIdArg { task_id } = parse(args)?;
            find_task(state, &task_id)?;
            set_status(state, &task_id, TaskStatus::Draft);
            to_value(find_task(state, &task_id)?)
        }
        "duplicate_task" => {
            let ReqArg { req } = parse::<ReqArg<DuplicateReq>>(args)?;
            let original = find_task(state, &req.task_id)?.clone();
            let id = fresh_id(state, "task");
            let mut copy = original.clone();
            copy.id = id.clone();
            copy.title = req.new_title.unwrap_or_else(|| format!("{} (copy)", original.title));
            copy.status = TaskStatus::Draft;
            copy.children_ids.clear();
            for child_id in &original.children_ids {
                let child = find_task(state, child_id).ok().cloned();
                if let Some(mut child) = child {
                    child.id = fresh_id(state, "task");
                    child.parent_id = Some(id.clone());
                    child.parent_title = Some(copy.title.clone());
                    copy.children_ids.push(child.id.clone());
                    state.tasks.push(child);
                }
            }
            state.tasks.push(copy.clone());
            to_value(&copy)
        }

        // Tags
        "list_tags" => to_value(&state.tags),
        "create_tag" => {
            let RequestArg { request } = parse::<RequestArg<TagReq>>(args)?;
            let name = request.name.unwrap_or_default();
            if name.trim().is_empty() {
                return Err("tag name is required".to_string());
            }
            if state.tags.iter().any(|t| t.name == name) {
                return Err(format!("Tag '{}' already exists", name));
            }
            let tag = Tag {
                id: fresh_id(state, "tag"),
                name,
                color: request.color,
                usage_count: 0,
                created_at: TIMESTAMP.to_string(),
            };
            state.tags.push(tag.clone());
            to_value(&tag)
        }
        "update_tag" => {
            let UpdateTagArgs { tag_id, request } = parse(args)?;
            let tag = state.tags.iter_mut().find(|t| t.id == tag_id).ok_or("Tag not found")?;
            if let Some(name) = request.name {
                tag.name = name;
            }
            if request.color.is_some() {
                tag.color = request.color;
            }
            let tag = tag.clone();
            to_value(&tag)
        }
        "delete_tag" => {
            let TagIdArg { tag_id } = parse(args)?;
            let before = state.tags.len();
            state.tags.retain(|t| t.id != tag_id);
            if state.tags.len() == before {
                return Err("Tag not found".to_string());
            }
            Ok(Value::Null)
        }
        other => Err(format!("unknown command: {}", other)),
    }
}

fn make_task(id: &str, title: &str, status: TaskStatus, parent_id: Option<String>) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        status,
        tags: Vec::new(),
        parent_id,
        parent_title: None,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
        children_ids: Vec::new(),
    }
}

fn fresh_id(state: &mut FakeState, prefix: &str) -> String {
    state.next_id += 1;
    format!("{}-{}", prefix, state.next_id)
}

fn find_task<'a>(state: &'a FakeState, id: &str) -> Result<&'a Task, String> {
    state.tasks.iter().find(|t| t.id == id).ok_or_else(|| "Task not found".to_string())
}

fn set_status(state: &mut FakeState, id: &str, status: TaskStatus) {
    if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
        task.status = status;
    }
}

fn add_to_queue(state: &mut FakeState, task_id: &str) -> Result<QueueEntry, String> {
    find_task(state, task_id)?;
    if state.queue.iter().any(|e| e.task_id == task_id) {
        return Err("Task is already in the queue".to_string());
    }
    let entry = QueueEntry {
        task_id: task_id.to_string(),
        position: i32::try_from(state.queue.len()).map_err(|e| e.to_string())?,
        added_at: TIMESTAMP.to_string(),
    };
    state.queue.push(entry.clone());
    set_status(state, task_id, TaskStatus::Active);
    Ok(entry)
}

fn drain_queue(state: &mut FakeState, status: TaskStatus) {
    let ids: Vec<String> = state.queue.drain(..).map(|e| e.task_id).collect();
    for id in ids {
        set_status(state, &id, status);
    }
}

fn sorted_queue(state: &FakeState) -> Vec<QueueEntry> {
    let mut queue = state.queue.clone();
    queue.sort_by_key(|e| e.position);
    queue
}

fn renumber(state: &mut FakeState) {
    let ids: Vec<String> = sorted_queue(state).into_iter().map(|e| e.task_id).collect();
    apply_order(state, &ids);
}

fn apply_order(state: &mut FakeState, ids: &[String]) {
    for (position, id) in ids.iter().enumerate() {
        if let Some(entry) = state.queue.iter_mut().find(|e| e.task_id == *id) {
            entry.position = i32::try_from(position).unwrap_or(i32::MAX);
        }
    }
}

fn queue_with_tasks(state: &FakeState) -> Vec<QueueEntryWithTask> {
    sorted_queue(state)
        .into_iter()
        .filter_map(|entry| {
            let task = state.tasks.iter().find(|t| t.id == entry.task_id)?;
            Some(QueueEntryWithTask {
                task_id: entry.task_id,
                position: entry.position,
                added_at: entry.added_at,
                task_title: task.title.clone(),
                task_status: task.status,
                task_description: task.description.clone(),
            })
        })
        .collect()
}

fn hierarchy(state: &FakeState) -> Vec<TaskHierarchy> {
    fn node(state: &FakeState, task: &Task) -> TaskHierarchy {
        TaskHierarchy {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            tags: task.tags.clone(),
            parent_id: task.parent_id.clone(),
            created_at: task.created_at.clone(),
            updated_at: task.updated_at.clone(),
            children: state
                .tasks
                .iter()
                .filter(|t| t.parent_id.as_deref() == Some(task.id.as_str()))
                .map(|t| node(state, t))
                .collect(),
        }
    }
    state
        .tasks
        .iter()
        .filter(|t| t.parent_id.is_none() && matches!(t.status, TaskStatus::Draft | TaskStatus::Active))
        .map(|t| node(state, t))
        .collect()
}

fn matches_search(task: &Task, query: &SearchArgs) -> bool {
    let keyword = query
        .q
        .as_deref()
        .map_or(true, |q| task.title.to_lowercase().contains(&q.to_lowercase()));
    let status = query.status.map_or(true, |s| task.status == s);
    let tags = query
        .tags
        .as_ref()
        .map_or(true, |tags| tags.is_empty() || tags.iter().any(|t| task.tags.contains(t)));
    keyword && status && tags
}
