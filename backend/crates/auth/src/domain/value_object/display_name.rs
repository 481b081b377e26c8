//! Display name: free text shown as the author of posts.

use std::fmt;

use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(input: impl AsRef<str>) -> AuthResult<Self> {
        let value = input.as_ref().trim();
        if value.is_empty() {
            return Err(AuthError::Validation("Display name cannot be empty".into()));
        }
        if value.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Display name must be at most {DISPLAY_NAME_MAX_LENGTH} characters"
            )));
        }
        if value.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Display name contains control characters".into(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Uses `input` when it has content, otherwise the user name.
    pub fn or_user_name(input: Option<&str>, user_name: &UserName) -> AuthResult<Self> {
        match input.filter(|s| !s.trim().is_empty()) {
            Some(value) => Self::new(value),
            None => Ok(Self(user_name.original().to_string())),
        }
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
