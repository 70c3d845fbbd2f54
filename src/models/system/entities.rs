use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 系统设置键值对
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 系统初始化标记键：首个管理员创建完成后写入，且只写一次
pub const SYSTEM_INITIALIZED_KEY: &str = "system.initialized";
