use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::profiles::entities::ProfileRole;

/// 创建邀请
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct CreateInvitationRequest {
    pub email: String,
    pub role: ProfileRole,
}

/// 兑换邀请（身份提供方回调，携带不透明 token）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct RedeemInvitationRequest {
    pub token: String,
    pub display_name: Option<String>,
}

/// 邀请列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct InvitationListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub used: Option<bool>,
}
