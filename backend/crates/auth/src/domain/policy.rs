//! Authorization policy.
//!
//! Two rules, both "administrator OR the requester is the subject":
//! acting on a user account and acting on an owned resource such as a post.
//! Pure functions; callers apply them before any mutation.

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Requester {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Anything with a single owning user.
pub trait OwnedResource {
    fn owner_id(&self) -> UserId;
}

pub fn can_act_on_user(requester: &Requester, target: &UserId) -> bool {
    requester.is_admin() || requester.user_id == *target
}

pub fn can_act_on<R: OwnedResource + ?Sized>(requester: &Requester, resource: &R) -> bool {
    can_act_on_user(requester, &resource.owner_id())
}
