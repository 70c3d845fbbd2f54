use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ConfidenceBucket, GradeStatus};

/// 写入 AI 评估（系统内部路径 / 管理员手动重触发后回写）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct RecordAiAssessmentRequest {
    pub score: f64,
    pub feedback: String,
    pub confidence: ConfidenceBucket,
}

/// 教师写入最终评分
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct RecordFinalGradeRequest {
    pub score: f64,
    pub comments: Option<String>,
    pub status: GradeStatus,
}
