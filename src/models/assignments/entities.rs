use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业
///
/// 必须归属一门课程；question_ids 保持创建时的顺序。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub creator_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub question_ids: Vec<i64>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
