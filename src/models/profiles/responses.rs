use serde::Serialize;
use ts_rs::TS;

use super::entities::Profile;
use crate::models::PaginationInfo;

/// 档案列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ProfileListResponse {
    pub items: Vec<Profile>,
    pub pagination: PaginationInfo,
}
