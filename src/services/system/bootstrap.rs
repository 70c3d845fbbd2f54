use tracing::info;

use super::SystemService;
use crate::errors::{Result, VocademyError};
use crate::models::profiles::{
    entities::{ApprovalStatus, ProfileRole},
    requests::CreateProfileRequest,
};
use crate::models::system::{
    entities::SYSTEM_INITIALIZED_KEY,
    requests::BootstrapRequest,
    responses::BootstrapResponse,
};
use crate::utils::validate::validate_email;

/// 一次性系统引导：创建首个管理员
///
/// 初始化标记用 key 冲突做原子判定，并发引导只有一个成功。
/// 所有校验都在标记写入之前完成，失败不消耗引导机会。
pub(super) async fn bootstrap(
    service: &SystemService,
    req: BootstrapRequest,
) -> Result<BootstrapResponse> {
    validate_email(&req.admin_email).map_err(VocademyError::validation)?;
    if service
        .storage
        .get_profile_by_email(&req.admin_email)
        .await?
        .is_some()
    {
        return Err(VocademyError::invalid_state("该邮箱已有档案"));
    }

    let claimed = service
        .storage
        .set_setting_if_absent(SYSTEM_INITIALIZED_KEY, "true")
        .await?;
    if !claimed {
        return Err(VocademyError::invalid_state("系统已完成初始化"));
    }

    let admin = service
        .storage
        .create_profile(CreateProfileRequest {
            email: req.admin_email,
            display_name: req.display_name,
            role: ProfileRole::Admin,
            approval_status: ApprovalStatus::Approved,
        })
        .await?;

    info!(admin_id = admin.id, "系统引导完成，首个管理员已创建");
    Ok(BootstrapResponse { admin })
}
