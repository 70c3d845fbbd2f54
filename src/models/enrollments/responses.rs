use serde::Serialize;
use ts_rs::TS;

use super::entities::{Enrollment, InstructorAssignment};
use crate::models::PaginationInfo;

/// 选课列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListResponse {
    pub items: Vec<Enrollment>,
    pub pagination: PaginationInfo,
}

/// 课程成员响应（学生 + 教师）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CourseMembersResponse {
    pub enrollments: Vec<Enrollment>,
    pub instructors: Vec<InstructorAssignment>,
}
