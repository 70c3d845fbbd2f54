//! 系统服务
//!
//! 首个管理员通过一次性引导创建，之后的角色提升只能由管理员签发邀请
//! 或变更角色。引导标记写入系统设置表，key 冲突即拒绝，天然幂等。

mod bootstrap;
mod status;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::system::{
    requests::BootstrapRequest,
    responses::{BootstrapResponse, SystemStatusResponse},
};
use crate::storage::Storage;

pub struct SystemService {
    storage: Arc<dyn Storage>,
    started_at: chrono::DateTime<chrono::Utc>,
}

impl SystemService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            started_at: chrono::Utc::now(),
        }
    }

    /// 未认证可访问
    pub async fn status(&self) -> Result<SystemStatusResponse> {
        status::status(self).await
    }

    /// 未认证可访问，但只有第一次调用成功
    pub async fn bootstrap(&self, req: BootstrapRequest) -> Result<BootstrapResponse> {
        bootstrap::bootstrap(self, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::profiles::entities::{ApprovalStatus, ProfileRole};
    use crate::services::testing::memory_storage;

    #[tokio::test]
    async fn test_bootstrap_creates_first_admin_once() {
        let storage = memory_storage().await;
        let service = SystemService::new(storage.clone());

        let before = service.status().await.unwrap();
        assert!(!before.initialized);

        let result = service
            .bootstrap(BootstrapRequest {
                admin_email: "admin@example.com".to_string(),
                display_name: Some("首任管理员".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(result.admin.role, ProfileRole::Admin);
        assert_eq!(result.admin.approval_status, ApprovalStatus::Approved);

        let after = service.status().await.unwrap();
        assert!(after.initialized);

        // 引导只有一次
        let err = service
            .bootstrap(BootstrapRequest {
                admin_email: "second@example.com".to_string(),
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_bad_email_without_burning_flag() {
        let storage = memory_storage().await;
        let service = SystemService::new(storage.clone());

        let err = service
            .bootstrap(BootstrapRequest {
                admin_email: "not-an-email".to_string(),
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::Validation(_)));

        // 校验失败不消耗引导机会
        let status = service.status().await.unwrap();
        assert!(!status.initialized);
    }
}
