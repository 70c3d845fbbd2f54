use serde::Serialize;
use ts_rs::TS;

use crate::models::profiles::entities::Profile;

/// 系统状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemStatusResponse {
    pub initialized: bool,
    pub version: String,
    pub uptime_seconds: i64,
}

/// 引导结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct BootstrapResponse {
    pub admin: Profile,
}
