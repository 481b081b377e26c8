//! Post entity.

use auth::OwnedResource;
use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{post_content::PostContent, post_id::PostId};

#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    /// Owner. Never changes after creation.
    pub author_id: UserId,
    /// Author display name captured at creation. Shown only when the
    /// author link no longer resolves.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author_id: UserId, author: impl Into<String>, body: PostContent) -> Self {
        let now = Utc::now();
        Self {
            post_id: PostId::new(),
            title: body.title,
            content: body.content,
            author_id,
            author: author.into(),
            created_at: now,
            last_modified_at: now,
        }
    }

    /// Replaces title and content. `last_modified_at` never moves backwards.
    pub fn edit(&mut self, body: PostContent) {
        self.title = body.title;
        self.content = body.content;
        self.last_modified_at = Utc::now().max(self.last_modified_at);
    }
}

impl OwnedResource for Post {
    fn owner_id(&self) -> UserId {
        self.author_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn body(title: &str, content: &str) -> PostContent {
        PostContent::new(title, content).unwrap()
    }

    #[test]
    fn new_post_timestamps_are_equal() {
        let post = Post::new(UserId::new(), "alice", body("Hello", "World"));
        assert_eq!(post.created_at, post.last_modified_at);
        assert_eq!(post.author, "alice");
    }

    #[test]
    fn edit_changes_only_text_and_modification_time() {
        let author = UserId::new();
        let mut post = Post::new(author, "alice", body("Hello", "World"));
        let (id, created) = (post.post_id, post.created_at);

        post.edit(body("Hi", "There"));
        assert_eq!((post.title.as_str(), post.content.as_str()), ("Hi", "There"));
        assert_eq!(post.post_id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, created);
        assert!(post.last_modified_at >= created);
    }

    #[test]
    fn modification_time_is_clamped_under_clock_skew() {
        let mut post = Post::new(UserId::new(), "alice", body("a", "b"));
        let future = Utc::now() + Duration::hours(1);
        post.last_modified_at = future;

        post.edit(body("c", "d"));
        assert_eq!(post.last_modified_at, future);
    }
}
