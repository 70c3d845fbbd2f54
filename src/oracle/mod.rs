//! 评分预言机
//!
//! 外部 AI 评分服务的客户端封装。预言机拿到题目、作答与评分标准，
//! 返回分数、反馈与置信度。调用方自行决定失败后的处置：提交保持
//! submitted 状态等待重触发或人工评分，这里不做自动重试。

mod http;

pub use http::HttpScoringOracle;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::assessments::entities::ConfidenceBucket;

/// 一道题的评分素材
#[derive(Debug, Clone, Serialize)]
pub struct ScoringItem {
    pub question_id: i64,
    pub question: String,
    pub answer: String,
    pub rubric: Option<String>,
}

/// 预言机的评分结论
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringVerdict {
    pub score: f64,
    pub feedback: String,
    pub confidence: ConfidenceBucket,
}

#[async_trait::async_trait]
pub trait ScoringOracle: Send + Sync {
    /// 对一次提交的全部作答打分，request_id 用于链路追踪
    async fn assess(&self, request_id: &str, items: &[ScoringItem]) -> Result<ScoringVerdict>;
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// 固定返回预设结论的预言机，测试用
    pub struct FixedOracle {
        pub verdict: ScoringVerdict,
        pub calls: Mutex<u32>,
    }

    impl FixedOracle {
        pub fn scoring(score: f64) -> Self {
            Self {
                verdict: ScoringVerdict {
                    score,
                    feedback: "Looks reasonable overall.".to_string(),
                    confidence: ConfidenceBucket::Medium,
                },
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ScoringOracle for FixedOracle {
        async fn assess(&self, _request_id: &str, _items: &[ScoringItem]) -> Result<ScoringVerdict> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.verdict.clone())
        }
    }

    /// 总是失败的预言机，模拟上游不可用
    pub struct FailingOracle;

    #[async_trait::async_trait]
    impl ScoringOracle for FailingOracle {
        async fn assess(&self, _request_id: &str, _items: &[ScoringItem]) -> Result<ScoringVerdict> {
            Err(crate::errors::VocademyError::upstream_failure(
                "scoring oracle unavailable",
            ))
        }
    }
}
