//! User entity.
//!
//! Profile and role only. The password hash lives in [`super::auth::Auth`].

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_id::UserId, user_name::UserName,
    user_role::UserRole,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub user_name: UserName,
    pub display_name: DisplayName,
    /// Only set for the bootstrap administrator.
    pub email: Option<Email>,
    /// `None` until a role is assigned. Read through [`User::role`].
    pub user_role: Option<UserRole>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: UserName, display_name: DisplayName, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            user_name,
            display_name,
            email: None,
            user_role: Some(role),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    /// Effective role; unassigned reads as `User`.
    pub fn role(&self) -> UserRole {
        self.user_role.unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }

    /// Replaces whatever role was held before.
    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = Some(role);
        self.touch();
    }

    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.touch();
    }

    pub fn set_display_name(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
