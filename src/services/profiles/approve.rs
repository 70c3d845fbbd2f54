use tracing::info;

use super::ProfileService;
use crate::errors::{Result, VocademyError};
use crate::models::profiles::{entities::Profile, requests::ApproveProfileRequest};
use crate::policy::Actor;
use crate::storage::{ensure_affected, ensure_found};

/// 审批状态是授权输入，只有管理员可以写
pub(super) async fn approve_profile(
    service: &ProfileService,
    actor: &Actor,
    id: i64,
    req: ApproveProfileRequest,
) -> Result<Profile> {
    crate::services::require_approved(actor)?;
    if !actor.is_admin() {
        return Err(VocademyError::role_forbidden(
            "只有管理员可以变更审批状态",
        ));
    }

    let affected = service
        .storage
        .set_approval_status(id, req.approval_status.clone())
        .await?;
    ensure_affected(affected, "set approval status")?;

    info!(
        actor_id = actor.id,
        profile_id = id,
        status = %req.approval_status,
        "审批状态已变更"
    );
    ensure_found(service.storage.get_profile_by_id(id).await?, "profile")
}
