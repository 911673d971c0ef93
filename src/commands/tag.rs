//! Tag Commands
//!
//! Frontend bindings for tag-related backend commands.

use serde::de::IgnoredAny;
use serde::Serialize;

use super::Gateway;
use crate::error::CommandError;
use crate::models::Tag;

// ========================
// Argument Structs
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateTagRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Serialize)]
struct CreateTagArgs<'a> {
    request: &'a CreateTagRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTagArgs<'a> {
    tag_id: &'a str,
    request: &'a UpdateTagRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TagIdArgs<'a> {
    tag_id: &'a str,
}

// ========================
// Tag CRUD Commands
// ========================

impl Gateway {
    pub async fn list_tags(&self) -> Result<Vec<Tag>, CommandError> {
        self.call("list_tags").await
    }

    pub async fn create_tag(&self, request: &CreateTagRequest) -> Result<Tag, CommandError> {
        self.call_with("create_tag", &CreateTagArgs { request }).await
    }

    pub async fn update_tag(&self, tag_id: &str, request: &UpdateTagRequest) -> Result<Tag, CommandError> {
        self.call_with("update_tag", &UpdateTagArgs { tag_id, request }).await
    }

    pub async fn delete_tag(&self, tag_id: &str) -> Result<(), CommandError> {
        let _: IgnoredAny = self.call_with("delete_tag", &TagIdArgs { tag_id }).await?;
        Ok(())
    }
}
