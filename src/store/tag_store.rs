//! Tag Store
//!
//! Tag list for the management page. Each mutation reloads the list.

use std::future::Future;

use chrono::{Local, NaiveDateTime};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::commands::{CreateTagRequest, Gateway, UpdateTagRequest};
use crate::error::CommandError;
use crate::models::Tag;

/// `YYYYMMDD_HHmmss`
pub fn timestamp_suffix(at: NaiveDateTime) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

pub fn duplicate_tag_name(name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}", name, timestamp_suffix(at))
}

#[derive(Clone, Debug, Default, Store)]
pub struct TagState {
    pub tags: Vec<Tag>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone, Copy)]
pub struct TagStore {
    state: Store<TagState>,
    gateway: StoredValue<Gateway>,
}

impl TagStore {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            state: Store::new(TagState::default()),
            gateway: StoredValue::new(gateway),
        }
    }

    pub fn state(&self) -> Store<TagState> {
        self.state
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.state.tags().get()
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

    async fn mutate<T, F, Fut>(&self, op: F) -> Result<T, CommandError>
    where
        F: FnOnce(Gateway) -> Fut,
        Fut: Future<Output = Result<T, CommandError>>,
    {
        let result = self.run(op).await?;
        self.load_tags().await?;
        Ok(result)
    }

    pub async fn load_tags(&self) -> Result<(), CommandError> {
        let tags = self.run(|gw| async move { gw.list_tags().await }).await?;
        self.state.tags().set(tags);
        Ok(())
    }

    pub async fn create_tag(&self, name: String, color: Option<String>) -> Result<Tag, CommandError> {
        let request = CreateTagRequest { name, color };
        self.mutate(|gw| async move { gw.create_tag(&request).await }).await
    }

    pub async fn update_tag(&self, id: String, request: UpdateTagRequest) -> Result<Tag, CommandError> {
        self.mutate(|gw| async move { gw.update_tag(&id, &request).await }).await
    }

    pub async fn delete_tag(&self, id: String) -> Result<(), CommandError> {
        self.mutate(|gw| async move { gw.delete_tag(&id).await }).await
    }

    /// New tag named `{name}_{timestamp}` with the same color, stamped now
    pub async fn duplicate_tag(&self, tag: &Tag) -> Result<Tag, CommandError> {
        self.duplicate_tag_at(tag, Local::now().naive_local()).await
    }

    pub async fn duplicate_tag_at(&self, tag: &Tag, at: NaiveDateTime) -> Result<Tag, CommandError> {
        let name = duplicate_tag_name(&tag.name, at);
        self.create_tag(name, tag.color.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeBackend;
    use chrono::NaiveDate;
    use futures::executor::block_on;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_timestamp_suffix_is_zero_padded() {
        assert_eq!(timestamp_suffix(at(9, 5, 3)), "20250307_090503");
        assert_eq!(duplicate_tag_name("work", at(14, 30, 0)), "work_20250307_143000");
    }

    #[test]
    fn test_duplicate_keeps_color_and_source_tag() {
        let backend = FakeBackend::new();
        backend.add_tag("tag-a", "work", Some("#ef4444"));
        let (gateway, _) = FakeBackend::gateway(&backend);
        let store = TagStore::new(gateway);
        block_on(store.load_tags()).unwrap();
        let source = store.state().tags().get_untracked()[0].clone();

        let copy = block_on(store.duplicate_tag(&source)).unwrap();

        assert!(copy.name.starts_with("work_"));
        let suffix = &copy.name["work_".len()..];
        assert_eq!(suffix.len(), "YYYYMMDD_HHmmss".len());
        assert_eq!(suffix.as_bytes()[8], b'_');
        assert!(suffix.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
        assert_eq!(copy.color.as_deref(), Some("#ef4444"));

        let tags = store.state().tags().get_untracked();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0], source);
    }

    #[test]
    fn test_duplicate_at_fixed_time() {
        let backend = FakeBackend::new();
        backend.add_tag("tag-u", "urgent", Some("#f97316"));
        let (gateway, _) = FakeBackend::gateway(&backend);
        let store = TagStore::new(gateway);
        block_on(store.load_tags()).unwrap();
        let source = store.state().tags().get_untracked()[0].clone();
        let noon = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();

        let copy = block_on(store.duplicate_tag_at(&source, noon)).unwrap();

        assert_eq!(copy.name, "urgent_20250101_120000");
        assert_eq!(copy.color.as_deref(), Some("#f97316"));
        let args = backend.args_of("create_tag").unwrap();
        assert_eq!(args["request"]["name"], "urgent_20250101_120000");
        assert_eq!(args["request"]["color"], "#f97316");
        assert_eq!(backend.tags().len(), 2);
    }

    #[test]
    fn test_mutations_reload() {
        let backend = FakeBackend::new();
        let (gateway, _) = FakeBackend::gateway(&backend);
        let store = TagStore::new(gateway);

        let tag = block_on(store.create_tag("home".to_string(), None)).unwrap();
        block_on(store.update_tag(
            tag.id.clone(),
            UpdateTagRequest { color: Some("#22c55e".to_string()), ..Default::default() },
        ))
        .unwrap();
        assert_eq!(store.state().tags().get_untracked()[0].color.as_deref(), Some("#22c55e"));

        block_on(store.delete_tag(tag.id)).unwrap();

        assert!(store.state().tags().get_untracked().is_empty());
        assert_eq!(
            backend.calls(),
            vec!["create_tag", "list_tags", "update_tag", "list_tags", "delete_tag", "list_tags"]
        );
    }

    #[test]
    fn test_duplicate_name_is_rejected_by_backend() {
        let backend = FakeBackend::new();
        backend.add_tag("tag-a", "work", None);
        let (gateway, toasts) = FakeBackend::gateway(&backend);
        let store = TagStore::new(gateway);

        let err = block_on(store.create_tag("work".to_string(), None)).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(store.state().error().get_untracked(), Some(err.to_string()));
        assert_eq!(toasts.toasts_untracked().len(), 1);
    }
}
