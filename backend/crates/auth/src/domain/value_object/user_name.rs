//! User name.
//!
//! The handle used to log in. Input is NFKC-normalised and trimmed; case is
//! preserved for display while uniqueness is decided on the lowercase
//! canonical form, so `Alice` and `alice` are the same account.
//!
//! Allowed: ASCII letters, digits and `_ . - + @`, 3 to 50 characters,
//! starting and ending with a letter, digit or `_`.

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::error::AuthError;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 50;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+', '@'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooShort { length: usize },
    TooLong { length: usize },
    InvalidCharacter { char: char, position: usize },
    InvalidEdge { char: char },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
            Self::TooShort { length } => write!(
                f,
                "User name is too short ({length} chars, minimum {USER_NAME_MIN_LENGTH})"
            ),
            Self::TooLong { length } => write!(
                f,
                "User name is too long ({length} chars, maximum {USER_NAME_MAX_LENGTH})"
            ),
            Self::InvalidCharacter { char, position } => write!(
                f,
                "Invalid character '{char}' at position {position}. Only letters, digits and _ . - + @ are allowed"
            ),
            Self::InvalidEdge { char } => write!(
                f,
                "User name cannot start or end with '{char}'"
            ),
        }
    }
}

impl std::error::Error for UserNameError {}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_ascii_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuilds a stored name without re-validating it.
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_ascii_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// As typed by the user.
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for uniqueness and lookup.
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Same account, ignoring case.
    pub fn same_as(&self, other: &UserName) -> bool {
        self.canonical == other.canonical
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        let mut chars = name.chars();
        let (Some(first), last) = (chars.next(), chars.next_back()) else {
            return Err(UserNameError::Empty);
        };

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort { length });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong { length });
        }

        if let Some((position, char)) = name
            .chars()
            .enumerate()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(c)))
        {
            return Err(UserNameError::InvalidCharacter { char, position });
        }

        let last = last.unwrap_or(first);
        for edge in [first, last] {
            if !(edge.is_ascii_alphanumeric() || edge == '_') {
                return Err(UserNameError::InvalidEdge { char: edge });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({:?})", self.original)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_case_but_compares_canonically() {
        let a = UserName::new("  Alice ").unwrap();
        let b = UserName::new("alice").unwrap();
        assert_eq!(a.original(), "Alice");
        assert_eq!(a.canonical(), "alice");
        assert!(a.same_as(&b));
    }

    #[test]
    fn fullwidth_input_is_normalised() {
        let name = UserName::new("ＢＯＢ").unwrap();
        assert_eq!(name.original(), "BOB");
    }

    #[test]
    fn email_style_names_are_allowed() {
        assert!(UserName::new("admin@blog.local").is_ok());
        assert!(UserName::new("admin").is_ok());
    }

    #[test]
    fn rejects_bad_names() {
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
        assert!(matches!(
            UserName::new("ab"),
            Err(UserNameError::TooShort { length: 2 })
        ));
        assert!(matches!(
            UserName::new("a".repeat(51)),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(matches!(
            UserName::new("bad name"),
            Err(UserNameError::InvalidCharacter { char: ' ', position: 3 })
        ));
        assert!(matches!(
            UserName::new(".alice"),
            Err(UserNameError::InvalidEdge { char: '.' })
        ));
    }

    #[test]
    fn validation_errors_become_bad_requests() {
        let err: AuthError = UserNameError::Empty.into();
        assert_eq!(err.status_code(), 400);
    }
}
