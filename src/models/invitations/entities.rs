use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::profiles::entities::ProfileRole;

/// 邀请
///
/// token 由外部发号器产生、全局唯一；used_at 非空即终态，不可删除或重发。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invitation.ts")]
pub struct Invitation {
    pub id: i64,
    pub token: String,
    pub email: String,
    pub role: ProfileRole,
    pub invited_by: i64,
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
    pub used_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Invitation {
    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }
}
