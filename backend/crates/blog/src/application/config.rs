//! Blog configuration.

use crate::domain::value_object::preview::PREVIEW_LENGTH;

#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Characters kept in listing previews before the ellipsis.
    pub preview_length: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            preview_length: PREVIEW_LENGTH,
        }
    }
}

impl BlogConfig {
    pub fn with_preview_length(preview_length: usize) -> Self {
        Self { preview_length }
    }
}
