//! Shared fixtures for use case and router tests.

use std::sync::Arc;

use auth::Requester;
use auth::application::config::AuthConfig;
use auth::application::sign_up::{SignUpInput, SignUpUseCase};
use auth::domain::repository::UserRepository;
use auth::domain::value_object::{display_name::DisplayName, user_role::UserRole};
use auth::infra::memory::InMemoryAuthRepository;

use crate::application::create_post::{CreatePostInput, CreatePostUseCase};
use crate::domain::entity::post::Post;
use crate::infra::memory::InMemoryPostRepository;

pub const PASSWORD: &str = "CorrectHorse9!";

pub fn setup() -> (Arc<InMemoryAuthRepository>, Arc<InMemoryPostRepository>) {
    let users = Arc::new(InMemoryAuthRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
    (users, posts)
}

async fn create(users: &Arc<InMemoryAuthRepository>, name: &str, role: UserRole) -> Requester {
    let mut user = SignUpUseCase::new(users.clone(), Arc::new(AuthConfig::development()))
        .execute(SignUpInput {
            user_name: name.to_string(),
            password: PASSWORD.to_string(),
            confirm_password: None,
            display_name: None,
        })
        .await
        .expect("fixture user");
    if role.is_admin() {
        user.set_role(role);
        users.update(&user).await.expect("fixture role");
    }
    Requester::new(user.user_id, user.role())
}

pub async fn user(users: &Arc<InMemoryAuthRepository>, name: &str) -> Requester {
    create(users, name, UserRole::User).await
}

pub async fn admin(users: &Arc<InMemoryAuthRepository>, name: &str) -> Requester {
    create(users, name, UserRole::Admin).await
}

pub async fn rename(users: &Arc<InMemoryAuthRepository>, who: &Requester, display_name: &str) {
    let mut user = users
        .find_by_id(&who.user_id)
        .await
        .expect("fixture lookup")
        .expect("fixture user exists");
    user.set_display_name(DisplayName::new(display_name).expect("fixture display name"));
    users.update(&user).await.expect("fixture rename");
}

pub async fn write(
    posts: &Arc<InMemoryPostRepository>,
    author: &Requester,
    title: &str,
    content: &str,
) -> Post {
    CreatePostUseCase::new(posts.clone())
        .execute(
            author,
            CreatePostInput {
                title: title.to_string(),
                content: content.to_string(),
            },
        )
        .await
        .expect("fixture post")
}
