//! Read models returned by post queries. Never persisted.

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::repository::AuthoredPost;
use crate::domain::value_object::{post_id::PostId, preview::preview};

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPreview {
    pub post_id: PostId,
    pub title: String,
    pub author: String,
    pub content_preview: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullPost {
    pub post_id: PostId,
    pub title: String,
    pub author: String,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

impl PostPreview {
    pub fn new(authored: &AuthoredPost, preview_length: usize) -> Self {
        let post = &authored.post;
        Self {
            post_id: post.post_id,
            title: post.title.clone(),
            author: authored.author_label().to_string(),
            content_preview: preview(&post.content, preview_length).into_owned(),
            created_at: post.created_at,
            last_modified_at: post.last_modified_at,
        }
    }
}

impl From<AuthoredPost> for FullPost {
    fn from(authored: AuthoredPost) -> Self {
        let author = authored.author_label().to_string();
        let post = authored.post;
        Self {
            post_id: post.post_id,
            title: post.title,
            author,
            author_id: post.author_id,
            content: post.content,
            created_at: post.created_at,
            last_modified_at: post.last_modified_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::post::Post;
    use crate::domain::value_object::post_content::PostContent;
    use crate::domain::value_object::preview::{ELLIPSIS, PREVIEW_LENGTH};

    fn authored(display_name: Option<&str>, content: &str) -> AuthoredPost {
        AuthoredPost {
            post: Post::new(
                UserId::new(),
                "alice",
                PostContent::new("Hello", content).unwrap(),
            ),
            author_display_name: display_name.map(str::to_string),
        }
    }

    #[test]
    fn label_prefers_current_display_name() {
        let preview = PostPreview::new(&authored(Some("Alice L."), "World"), PREVIEW_LENGTH);
        assert_eq!(preview.author, "Alice L.");
        assert_eq!(preview.content_preview, "World");
    }

    #[test]
    fn label_falls_back_to_stored_author() {
        let full = FullPost::from(authored(None, "World"));
        assert_eq!(full.author, "alice");
        assert_eq!(full.content, "World");
    }

    #[test]
    fn preview_uses_configured_length() {
        let preview = PostPreview::new(&authored(None, "abcdefghij"), 4);
        assert_eq!(preview.content_preview, format!("abcd{ELLIPSIS}"));
    }
}
