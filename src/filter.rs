//! List Filtering
//!
//! Client-side narrowing, grouping and paging of already-loaded lists.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate};

use crate::models::{Tag, Task, TaskHierarchy, TaskStatus};

/// Task pool filter state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolFilter {
    pub query: String,
    /// Empty means every status
    pub statuses: HashSet<TaskStatus>,
    /// Tag names, matched with OR. Empty means no tag filter.
    pub tags: Vec<String>,
}

impl PoolFilter {
    pub fn toggle_status(&mut self, status: TaskStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn toggle_tag(&mut self, name: &str) {
        if let Some(index) = self.tags.iter().position(|t| t == name) {
            self.tags.remove(index);
        } else {
            self.tags.push(name.to_string());
        }
    }

    /// Title match on the task or any child, then status and tags
    pub fn matches(&self, task: &TaskHierarchy) -> bool {
        let query = self.query.to_lowercase();
        let title_hit = |t: &TaskHierarchy| t.title.to_lowercase().contains(&query);
        let tag_hit = |t: &TaskHierarchy| t.tags.iter().any(|tag| self.tags.contains(tag));

        let matches_search = title_hit(task) || task.children.iter().any(title_hit);
        let matches_status = self.statuses.is_empty() || self.statuses.contains(&task.status);
        let matches_tags = self.tags.is_empty() || tag_hit(task) || task.children.iter().any(tag_hit);
        matches_search && matches_status && matches_tags
    }

    pub fn apply(&self, tasks: &[TaskHierarchy]) -> Vec<TaskHierarchy> {
        tasks.iter().filter(|task| self.matches(task)).cloned().collect()
    }
}

/// Case-insensitive name match on the trimmed query
pub fn filter_tags(tags: &[Tag], query: &str) -> Vec<Tag> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return tags.to_vec();
    }
    tags.iter().filter(|tag| tag.name.to_lowercase().contains(&query)).cloned().collect()
}

/// Tasks sharing one local calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

impl DateGroup {
    /// e.g. "Fri Mar 07 2025"
    pub fn label(&self) -> String {
        self.date.format("%a %b %d %Y").to_string()
    }
}

fn updated_local(task: &Task) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&task.updated_at).ok().map(|dt| dt.with_timezone(&Local))
}

/// Newest day first, newest task first inside a day.
/// Tasks with an unparseable `updatedAt` are dropped.
pub fn group_by_date(tasks: &[Task]) -> Vec<DateGroup> {
    let mut stamped: Vec<(DateTime<Local>, &Task)> =
        tasks.iter().filter_map(|task| updated_local(task).map(|at| (at, task))).collect();
    stamped.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups: Vec<DateGroup> = Vec::new();
    for (at, task) in stamped {
        let date = at.date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.tasks.push(task.clone()),
            _ => groups.push(DateGroup { date, tasks: vec![task.clone()] }),
        }
    }
    groups
}

/// Keep the first `max` characters and append "..."
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

// ========================
// Pagination
// ========================

/// One-based page over `total` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Paging {
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1), total: 0 }
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1)) * self.page_size
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Accepts only `1..=total_pages`
    pub fn parse_page(&self, input: &str) -> Option<usize> {
        let page: usize = input.trim().parse().ok()?;
        (1..=self.total_pages()).contains(&page).then_some(page)
    }

    /// Slice of an in-memory list for the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
