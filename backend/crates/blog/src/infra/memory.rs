//! In-process post store for tests. Authors resolve against the in-memory
//! user store, and posting marks the author as referenced so user deletion
//! is refused as in the database schema.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use auth::domain::value_object::user_id::UserId;
use auth::infra::memory::InMemoryAuthRepository;

use crate::domain::entity::post::Post;
use crate::domain::repository::{AuthoredPost, PostRepository};
use crate::domain::value_object::post_id::PostId;
use crate::error::BlogResult;

pub struct InMemoryPostRepository {
    users: Arc<InMemoryAuthRepository>,
    posts: Mutex<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<InMemoryAuthRepository>) -> Self {
        Self {
            users,
            posts: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PostId, Post>> {
        self.posts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn authored(&self, post: Post) -> AuthoredPost {
        AuthoredPost {
            author_display_name: self.users.display_name_of(&post.author_id),
            post,
        }
    }
}

impl PostRepository for InMemoryPostRepository {
    async fn list_with_authors(&self) -> BlogResult<Vec<AuthoredPost>> {
        let mut posts: Vec<Post> = self.lock().values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts.into_iter().map(|p| self.authored(p)).collect())
    }

    async fn find_with_author(&self, post_id: &PostId) -> BlogResult<Option<AuthoredPost>> {
        let post = self.lock().get(post_id).cloned();
        Ok(post.map(|p| self.authored(p)))
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        Ok(self.lock().get(post_id).cloned())
    }

    async fn create(&self, post: &Post) -> BlogResult<()> {
        self.users.mark_has_posts(&post.author_id);
        self.lock().insert(post.post_id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> BlogResult<bool> {
        let mut posts = self.lock();
        let Some(stored) = posts.get_mut(&post.post_id) else {
            return Ok(false);
        };
        stored.title = post.title.clone();
        stored.content = post.content.clone();
        stored.last_modified_at = post.last_modified_at;
        Ok(true)
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<bool> {
        Ok(self.lock().remove(post_id).is_some())
    }

    async fn count(&self) -> BlogResult<i64> {
        Ok(self.lock().len() as i64)
    }

    async fn author_display_name(&self, author_id: &UserId) -> BlogResult<Option<String>> {
        Ok(self.users.display_name_of(author_id))
    }
}
