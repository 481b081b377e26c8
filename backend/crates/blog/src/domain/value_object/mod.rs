pub mod post_content;
pub mod post_id;
pub mod preview;
