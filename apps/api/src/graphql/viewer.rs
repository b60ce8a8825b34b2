//! Identity of the caller, as supplied by the auth layer

use crate::models::Role;

/// The authenticated caller of a request
///
/// Attached as request data by whatever authenticates the request; absent
/// for anonymous callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: i32,
    pub role: Role,
}

impl Viewer {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Whether this viewer may read the given user's private fields
    pub fn can_see_private_fields_of(&self, user_id: i32) -> bool {
        self.user_id == user_id || self.role.is_admin()
    }
}
