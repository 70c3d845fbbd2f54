use serde::Serialize;
use ts_rs::TS;

use super::entities::{AiAssessment, FinalGrade};

/// 学生可见的评估结果聚合
///
/// final_grade 存在时为权威结论；ai_assessment 始终作为临时反馈展示。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AssessmentOutcomeResponse {
    pub submission_id: i64,
    pub ai_assessment: Option<AiAssessment>,
    pub final_grade: Option<FinalGrade>,
    pub authoritative: bool, // final_grade 是否已存在
}
