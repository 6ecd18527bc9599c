use crate::domain::models::user::{Role, User};

// Pure access rules shared by every endpoint. No I/O: callers resolve the
// resource first (missing resources are NotFound before ownership is ever
// evaluated), then ask here whether the actor may touch it.

pub fn is_manager(actor: &User) -> bool {
    actor.role == Role::ProjectManager
}

/// Projects are managed exclusively by project managers.
pub fn can_manage_projects(actor: &User) -> bool {
    is_manager(actor)
}

/// A briefing is visible and writable to its creator; project managers have
/// blanket override. Attendance rights derive from the parent briefing's
/// creator through this same check.
pub fn can_access_briefing(actor: &User, briefing_created_by: i64) -> bool {
    is_manager(actor) || actor.id == briefing_created_by
}

/// Users may see their own record; managers may see anyone's.
pub fn can_view_user(actor: &User, target_id: i64) -> bool {
    is_manager(actor) || actor.id == target_id
}

pub fn can_update_user(actor: &User, target_id: i64) -> bool {
    is_manager(actor) || actor.id == target_id
}

pub fn can_change_role(actor: &User) -> bool {
    is_manager(actor)
}

pub fn can_list_users(actor: &User) -> bool {
    is_manager(actor)
}

pub fn can_delete_users(actor: &User) -> bool {
    is_manager(actor)
}

pub fn can_run_migration(actor: &User) -> bool {
    is_manager(actor)
}
