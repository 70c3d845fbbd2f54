use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EnrollmentStatus, InstructorRole};
use crate::models::common::pagination::PaginationQuery;

/// 学生选课（由课程教师或管理员发起）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollStudentRequest {
    pub student_id: i64,
}

/// 更新选课状态/进度
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub status: Option<EnrollmentStatus>,
    pub progress: Option<f64>,
}

/// 指派授课教师
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct AssignInstructorRequest {
    pub instructor_id: i64,
    pub role: InstructorRole,
}

/// 课程成员列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<EnrollmentStatus>,
}
