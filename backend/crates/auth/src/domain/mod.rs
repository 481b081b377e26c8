//! Domain layer: entities, value objects, the authorization policy and
//! repository traits.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

pub use entity::{auth::Auth, auth_session::AuthSession, user::User};
pub use policy::{OwnedResource, Requester, can_act_on, can_act_on_user};
pub use repository::{AuthRepository, AuthSessionRepository, UserRepository};
