use tracing::info;

use super::ProfileService;
use crate::errors::{Result, VocademyError};
use crate::models::profiles::{entities::Profile, requests::ChangeRoleRequest};
use crate::policy::Actor;
use crate::storage::{ensure_affected, ensure_found};

/// 全局角色只有管理员可以改，档案拥有者也不行
pub(super) async fn change_role(
    service: &ProfileService,
    actor: &Actor,
    id: i64,
    req: ChangeRoleRequest,
) -> Result<Profile> {
    crate::services::require_approved(actor)?;
    if !actor.is_admin() {
        return Err(VocademyError::role_forbidden("只有管理员可以变更角色"));
    }

    let affected = service
        .storage
        .set_profile_role(id, req.role.clone())
        .await?;
    ensure_affected(affected, "set profile role")?;

    info!(
        actor_id = actor.id,
        profile_id = id,
        role = %req.role,
        "角色已变更"
    );
    ensure_found(service.storage.get_profile_by_id(id).await?, "profile")
}
