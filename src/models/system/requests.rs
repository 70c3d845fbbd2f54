use serde::Deserialize;
use ts_rs::TS;

/// 系统引导：创建首个管理员
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct BootstrapRequest {
    pub admin_email: String,
    pub display_name: Option<String>,
}
