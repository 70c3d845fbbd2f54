use serde::Deserialize;
use ts_rs::TS;

use super::entities::CourseStatus;
use crate::models::common::pagination::PaginationQuery;

/// 创建课程
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 更新课程（不含状态；状态变更走独立接口且仅限管理员）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 课程状态变更（仅管理员）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct ChangeCourseStatusRequest {
    pub status: CourseStatus,
}

/// 课程列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}
