use serde::Serialize;
use ts_rs::TS;

use super::entities::Invitation;
use crate::models::PaginationInfo;
use crate::models::profiles::entities::Profile;

/// 邀请列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct InvitationListResponse {
    pub items: Vec<Invitation>,
    pub pagination: PaginationInfo,
}

/// 兑换结果：新建的档案
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct RedeemInvitationResponse {
    pub profile: Profile,
}
