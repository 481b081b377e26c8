//! HTTP handlers for `/api/posts`.

use std::sync::Arc;

use auth::Authenticated;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::{
    BlogConfig, CreatePostInput, CreatePostUseCase, DeletePostUseCase, QueryPostsUseCase,
    UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_id::PostId;
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{FullPostResponse, PostPreviewResponse, PostRequest};

/// Mount point used for `Location` headers.
pub const POSTS_PATH: &str = "/api/posts";

pub struct BlogAppState<P>
where
    P: PostRepository + Send + Sync + 'static,
{
    pub repo: Arc<P>,
    pub config: Arc<BlogConfig>,
}

impl<P> Clone for BlogAppState<P>
where
    P: PostRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P> BlogAppState<P>
where
    P: PostRepository + Send + Sync + 'static,
{
    fn query(&self) -> QueryPostsUseCase<P> {
        QueryPostsUseCase::new(self.repo.clone(), self.config.clone())
    }
}

/// GET /api/posts
pub async fn list_posts<P>(
    State(state): State<BlogAppState<P>>,
) -> BlogResult<Json<Vec<PostPreviewResponse>>>
where
    P: PostRepository + Send + Sync + 'static,
{
    let previews = state.query().list_previews().await?;
    Ok(Json(
        previews.into_iter().map(PostPreviewResponse::from).collect(),
    ))
}

/// GET /api/posts/{id}
pub async fn get_post<P>(
    State(state): State<BlogAppState<P>>,
    Path(id): Path<String>,
) -> BlogResult<Json<FullPostResponse>>
where
    P: PostRepository + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    let post = state
        .query()
        .get_full(&post_id)
        .await?
        .ok_or(BlogError::PostNotFound)?;
    Ok(Json(post.into()))
}

/// POST /api/posts
pub async fn create_post<P>(
    State(state): State<BlogAppState<P>>,
    auth: Authenticated,
    Json(req): Json<PostRequest>,
) -> BlogResult<Response>
where
    P: PostRepository + Send + Sync + 'static,
{
    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(
            &auth.requester,
            CreatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    let location = HeaderValue::from_str(&format!("{POSTS_PATH}/{}", post.post_id))
        .map_err(|e| BlogError::Internal(format!("Invalid Location header: {e}")))?;
    let body = FullPostResponse::from(state.query().present(post).await?);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

/// PUT /api/posts/{id}
pub async fn update_post<P>(
    State(state): State<BlogAppState<P>>,
    auth: Authenticated,
    Path(id): Path<String>,
    Json(req): Json<PostRequest>,
) -> BlogResult<Json<FullPostResponse>>
where
    P: PostRepository + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    let post = UpdatePostUseCase::new(state.repo.clone())
        .execute(
            &auth.requester,
            &post_id,
            UpdatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?
        .ok_or(BlogError::PostNotFound)?;

    Ok(Json(state.query().present(post).await?.into()))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<P>(
    State(state): State<BlogAppState<P>>,
    auth: Authenticated,
    Path(id): Path<String>,
) -> BlogResult<StatusCode>
where
    P: PostRepository + Send + Sync + 'static,
{
    let post_id = parse_post_id(&id)?;
    DeletePostUseCase::new(state.repo.clone())
        .execute(&auth.requester, &post_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A malformed id cannot name an existing post.
fn parse_post_id(raw: &str) -> BlogResult<PostId> {
    PostId::parse_str(raw).map_err(|_| BlogError::PostNotFound)
}
