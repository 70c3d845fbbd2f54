use tracing::info;

use super::CourseService;
use crate::errors::Result;
use crate::models::courses::{
    entities::{Course, CourseStatus},
    requests::CreateCourseRequest,
};
use crate::models::enrollments::entities::InstructorRole;
use crate::policy::{Action, Actor, CourseRelation, Resource, evaluate};

pub(super) async fn create_course(
    service: &CourseService,
    actor: &Actor,
    req: CreateCourseRequest,
) -> Result<Course> {
    evaluate(
        actor,
        Action::Create,
        &Resource::Course {
            status: CourseStatus::Draft,
            creator_id: actor.id,
            relation: CourseRelation::instructor(),
            active_enrollments: 0,
            assignments: 0,
            active_instructors: 0,
            changes_status: false,
        },
    )
    .require("create course")?;

    if req.title.trim().is_empty() {
        return Err(crate::errors::VocademyError::validation("课程标题不能为空"));
    }
    if req.capacity <= 0 {
        return Err(crate::errors::VocademyError::validation("课程容量必须为正数"));
    }

    let course = service.storage.create_course(actor.id, req).await?;

    // 创建者自动成为主讲，保证新课程不是无主资源
    service
        .storage
        .assign_instructor(course.id, actor.id, InstructorRole::Instructor)
        .await?;

    info!(actor_id = actor.id, course_id = course.id, "课程已创建");
    Ok(course)
}
