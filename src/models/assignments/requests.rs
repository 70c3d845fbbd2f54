use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建作业
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub question_ids: Vec<i64>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 更新作业
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub question_ids: Option<Vec<i64>>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 作业列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
}
