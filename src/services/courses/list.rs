use super::CourseService;
use crate::errors::Result;
use crate::models::courses::{
    entities::CourseStatus, requests::CourseListQuery, responses::CourseListResponse,
};
use crate::policy::Actor;

/// 课程目录
///
/// 非管理员只看到公开目录（active 课程）；draft 与 archived
/// 课程对成员仍可通过详情访问，但不进入目录，避免逐行做关系查询。
pub(super) async fn list_courses(
    service: &CourseService,
    actor: &Actor,
    mut query: CourseListQuery,
) -> Result<CourseListResponse> {
    crate::services::require_approved(actor)?;
    if !actor.is_admin() {
        query.status = Some(CourseStatus::Active);
    }

    service.storage.list_courses_with_pagination(query).await
}
