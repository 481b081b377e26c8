//! Request and response bodies. JSON field names are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::view::{FullPost, PostPreview};

/// Body of create and update. Any `author` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreviewResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content_preview: String,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl From<PostPreview> for PostPreviewResponse {
    fn from(preview: PostPreview) -> Self {
        Self {
            id: preview.post_id.to_string(),
            title: preview.title,
            author: preview.author,
            content_preview: preview.content_preview,
            created_date: preview.created_at,
            last_modified_date: preview.last_modified_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullPostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub author_id: String,
    pub content: String,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl From<FullPost> for FullPostResponse {
    fn from(post: FullPost) -> Self {
        Self {
            id: post.post_id.to_string(),
            title: post.title,
            author: post.author,
            author_id: post.author_id.to_string(),
            content: post.content,
            created_date: post.created_at,
            last_modified_date: post.last_modified_at,
        }
    }
}
