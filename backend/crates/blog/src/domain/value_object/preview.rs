//! Content preview shown in post listings.

use std::borrow::Cow;

/// Default number of characters kept in a preview.
pub const PREVIEW_LENGTH: usize = 150;

/// Appended when content was cut.
pub const ELLIPSIS: &str = "…";

/// First `max_chars` characters of `content` followed by [`ELLIPSIS`], or
/// the content unchanged when it is not longer than that.
///
/// Counts Unicode scalar values, so multi-byte text is never split inside
/// a character.
pub fn preview(content: &str, max_chars: usize) -> Cow<'_, str> {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &content[..cut])),
        None => Cow::Borrowed(content),
    }
}
