//! Title and body checks applied before a post is written.
//!
//! Empty values are accepted. Only sizes the schema cannot hold and
//! control characters in titles are rejected.

use crate::error::{BlogError, BlogResult};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const CONTENT_MAX_LENGTH: usize = 100_000;

/// Validated `(title, content)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub title: String,
    pub content: String,
}

impl PostContent {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> BlogResult<Self> {
        let title = title.into().trim().to_string();
        let content = content.into();

        if title.chars().count() > TITLE_MAX_LENGTH {
            return Err(BlogError::Validation(format!(
                "Title must be at most {TITLE_MAX_LENGTH} characters"
            )));
        }
        if title.chars().any(char::is_control) {
            return Err(BlogError::Validation(
                "Title cannot contain control characters".into(),
            ));
        }
        if content.chars().count() > CONTENT_MAX_LENGTH {
            return Err(BlogError::Validation(format!(
                "Content must be at most {CONTENT_MAX_LENGTH} characters"
            )));
        }

        Ok(Self { title, content })
    }
}
