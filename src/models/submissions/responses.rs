use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use crate::models::PaginationInfo;
use crate::models::assessments::entities::{AiAssessment, FinalGrade};

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}

/// 提交详情（含评估结果）
///
/// AI 评估一旦存在即对学生可见（临时反馈）；最终评分存在时以其为准。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetailResponse {
    pub submission: Submission,
    pub ai_assessment: Option<AiAssessment>,
    pub final_grade: Option<FinalGrade>,
}
