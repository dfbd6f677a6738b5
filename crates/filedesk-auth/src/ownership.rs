//! Owner-or-admin access to file resources.

use filedesk_entity::account::Role;

/// Whether an actor may act on a resource owned by `owner_id`.
///
/// Admins may act on anything; everyone else only on their own resources.
pub fn can_access(actor_id: &str, role: Role, owner_id: &str) -> bool {
    role.is_admin() || actor_id == owner_id
}
