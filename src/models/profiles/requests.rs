use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ApprovalStatus, ProfileRole};
use crate::models::common::pagination::PaginationQuery;

/// 创建档案（仅邀请兑换路径使用，不对外暴露）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct CreateProfileRequest {
    pub email: String,
    pub display_name: Option<String>,
    pub role: ProfileRole,
    pub approval_status: ApprovalStatus,
}

/// 更新自己的档案（非角色字段）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
}

/// 管理员审批
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ApproveProfileRequest {
    pub approval_status: ApprovalStatus,
}

/// 管理员改角色
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ChangeRoleRequest {
    pub role: ProfileRole,
}

/// 档案列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<ProfileRole>,
    pub approval_status: Option<ApprovalStatus>,
    pub search: Option<String>,
}
