//! User role.
//!
//! A user holds at most one role. Absence is stored as `NULL` and read as
//! [`UserRole::User`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    User = 0,
    Admin = 1,
}

impl UserRole {
    /// Database representation.
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Name exposed over the API.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Admin => "Admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::User),
            1 => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Parses a role name from a request.
    ///
    /// Missing or blank input means `User`; matching is case-insensitive;
    /// anything else is rejected.
    pub fn parse(input: Option<&str>) -> AuthResult<Self> {
        let name = input.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Ok(UserRole::User);
        }
        if name.eq_ignore_ascii_case("user") {
            Ok(UserRole::User)
        } else if name.eq_ignore_ascii_case("admin") {
            Ok(UserRole::Admin)
        } else {
            Err(AuthError::Validation(format!("Unknown role '{name}'")))
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
