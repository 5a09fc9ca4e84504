//! Single-owner resources.
//!
//! Only projects carry an owner; sections and refinements inherit theirs
//! from the project they belong to.

use super::UserId;

pub trait OwnedByUser {
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}
