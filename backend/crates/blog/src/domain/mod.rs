//! Domain layer: the post entity, preview rule, read views and the
//! repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;
pub mod view;

pub use entity::post::Post;
pub use repository::{AuthoredPost, PostRepository};
pub use view::{FullPost, PostPreview};
