//! Frontend Models
//!
//! Data structures matching backend DTOs. IDs and queue positions are
//! always assigned by the backend.

use serde::{Deserialize, Serialize};

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Draft => "draft",
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Archived => "archived",
        }
    }
}

/// Task data structure (matches backend `TaskResponse`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub children_ids: Vec<String>,
}

/// Task with its children, as returned by `get_task_hierarchy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHierarchy {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub children: Vec<TaskHierarchy>,
}

impl TaskHierarchy {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Paginated task list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedTaskResponse {
    pub tasks: Vec<Task>,
    pub total: i64,
}

/// Tag data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub usage_count: i32,
    pub created_at: String,
}

/// Preset tag colors offered by the tag editor
pub const PRESET_TAG_COLORS: [(&str, &str); 8] = [
    ("Red", "#ef4444"),
    ("Orange", "#f97316"),
    ("Yellow", "#eab308"),
    ("Green", "#22c55e"),
    ("Blue", "#3b82f6"),
    ("Indigo", "#6366f1"),
    ("Purple", "#a855f7"),
    ("Pink", "#ec4899"),
];

pub const DEFAULT_TAG_COLOR: &str = "#3b82f6";

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Queue entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub task_id: String,
    pub position: i32,
    pub added_at: String,
}

/// Queue entry with denormalized task fields for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryWithTask {
    pub task_id: String,
    pub position: i32,
    pub added_at: String,
    pub task_title: String,
    pub task_status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
}

/// Display slot of a queue row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueSlot {
    InProgress,
    /// Number of entries ahead of this one
    Waiting(usize),
}

impl QueueSlot {
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            QueueSlot::InProgress
        } else {
            QueueSlot::Waiting(index)
        }
    }

    pub fn label(&self) -> String {
        match self {
            QueueSlot::InProgress => "In Progress".to_string(),
            QueueSlot::Waiting(n) => format!("Waiting ({})", n),
        }
    }
}

/// True iff positions are exactly a permutation of `0..len`
pub fn is_dense_ordering(entries: &[QueueEntryWithTask]) -> bool {
    let mut seen = vec![false; entries.len()];
    for entry in entries {
        let Ok(position) = usize::try_from(entry.position) else {
            return false;
        };
        match seen.get_mut(position) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
