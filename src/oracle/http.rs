use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::{ScoringItem, ScoringOracle, ScoringVerdict};
use crate::config::AppConfig;
use crate::errors::{Result, VocademyError};

/// HTTP 评分预言机客户端
///
/// 单次调用带硬超时；超时或失败不重试，留给手动重触发路径。
pub struct HttpScoringOracle {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ScoringRequest<'a> {
    request_id: &'a str,
    items: &'a [ScoringItem],
}

impl HttpScoringOracle {
    pub fn from_config() -> Result<Self> {
        let config = AppConfig::get();
        Self::new(
            &config.oracle.endpoint,
            &config.oracle.api_key,
            Duration::from_secs(config.oracle.timeout),
        )
    }

    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                VocademyError::upstream_failure(format!("构建预言机客户端失败: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }
}

#[async_trait::async_trait]
impl ScoringOracle for HttpScoringOracle {
    async fn assess(&self, request_id: &str, items: &[ScoringItem]) -> Result<ScoringVerdict> {
        let body = ScoringRequest { request_id, items };

        // reqwest 客户端超时之外再套一层，覆盖连接建立阶段的悬挂
        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send(),
        )
        .await
        .map_err(|_| {
            warn!(request_id, "scoring oracle timed out");
            VocademyError::upstream_failure(format!(
                "scoring oracle timed out after {}s",
                self.timeout.as_secs()
            ))
        })?
        .map_err(|e| {
            warn!(request_id, error = %e, "scoring oracle request failed");
            VocademyError::upstream_failure(format!("scoring oracle request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(request_id, %status, "scoring oracle returned error status");
            return Err(VocademyError::upstream_failure(format!(
                "scoring oracle returned {status}"
            )));
        }

        let verdict = response.json::<ScoringVerdict>().await.map_err(|e| {
            VocademyError::upstream_failure(format!("scoring oracle response invalid: {e}"))
        })?;

        if !(0.0..=100.0).contains(&verdict.score) || verdict.score.is_nan() {
            return Err(VocademyError::upstream_failure(format!(
                "scoring oracle returned out-of-range score {}",
                verdict.score
            )));
        }

        info!(request_id, score = verdict.score, "scoring oracle verdict received");
        Ok(verdict)
    }
}
