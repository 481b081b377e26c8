//! PostgreSQL Repository Implementation

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::post::Post;
use crate::domain::repository::{AuthoredPost, PostRepository};
use crate::domain::value_object::post_id::PostId;
use crate::error::BlogResult;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgPostRepository {
    async fn list_with_authors(&self) -> BlogResult<Vec<AuthoredPost>> {
        let rows = sqlx::query_as::<_, AuthoredPostRow>(
            r#"
            SELECT
                p.post_id,
                p.title,
                p.content,
                p.author_id,
                p.author,
                p.created_at,
                p.last_modified_at,
                u.display_name AS author_display_name
            FROM posts p
            LEFT JOIN users u ON u.user_id = p.author_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AuthoredPostRow::into_authored).collect())
    }

    async fn find_with_author(&self, post_id: &PostId) -> BlogResult<Option<AuthoredPost>> {
        let row = sqlx::query_as::<_, AuthoredPostRow>(
            r#"
            SELECT
                p.post_id,
                p.title,
                p.content,
                p.author_id,
                p.author,
                p.created_at,
                p.last_modified_at,
                u.display_name AS author_display_name
            FROM posts p
            LEFT JOIN users u ON u.user_id = p.author_id
            WHERE p.post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthoredPostRow::into_authored))
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                title,
                content,
                author_id,
                author,
                created_at,
                last_modified_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn create(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                content,
                author_id,
                author,
                created_at,
                last_modified_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id.as_uuid())
        .bind(&post.author)
        .bind(post.created_at)
        .bind(post.last_modified_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, post: &Post) -> BlogResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                content = $3,
                last_modified_at = GREATEST(last_modified_at, $4)
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.last_modified_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<bool> {
        let deleted = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn count(&self) -> BlogResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn author_display_name(&self, author_id: &UserId) -> BlogResult<Option<String>> {
        let name = sqlx::query_scalar::<_, String>(
            "SELECT display_name FROM users WHERE user_id = $1",
        )
        .bind(author_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    author: String,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            title: self.title,
            content: self.content,
            author_id: UserId::from_uuid(self.author_id),
            author: self.author,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthoredPostRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_display_name: Option<String>,
}

impl AuthoredPostRow {
    fn into_authored(self) -> AuthoredPost {
        AuthoredPost {
            post: self.post.into_post(),
            author_display_name: self.author_display_name,
        }
    }
}
