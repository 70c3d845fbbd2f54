use super::SystemService;
use crate::errors::Result;
use crate::models::system::{entities::SYSTEM_INITIALIZED_KEY, responses::SystemStatusResponse};

pub(super) async fn status(service: &SystemService) -> Result<SystemStatusResponse> {
    let initialized = service
        .storage
        .get_setting(SYSTEM_INITIALIZED_KEY)
        .await?
        .is_some();

    Ok(SystemStatusResponse {
        initialized,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (chrono::Utc::now() - service.started_at).num_seconds(),
    })
}
