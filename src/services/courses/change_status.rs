use tracing::info;

use super::{CourseService, course_resource_full};
use crate::errors::{Result, VocademyError};
use crate::models::courses::{
    entities::{Course, CourseStatus},
    requests::ChangeCourseStatusRequest,
};
use crate::policy::{Action, Actor, evaluate};
use crate::storage::{ensure_affected, ensure_found};

pub(super) async fn change_status(
    service: &CourseService,
    actor: &Actor,
    id: i64,
    req: ChangeCourseStatusRequest,
) -> Result<Course> {
    let course = ensure_found(service.storage.get_course_by_id(id).await?, "course")?;

    let resource = course_resource_full(service, actor, &course, true).await?;
    evaluate(actor, Action::Update, &resource).require("change course status")?;

    // 归档课程重新开课前必须至少有一名在任教师，否则会出现无人负责的在读课程
    if course.status == CourseStatus::Archived && req.status == CourseStatus::Active {
        let instructors = service.storage.count_active_instructors(id).await?;
        if instructors == 0 {
            return Err(VocademyError::invalid_state(
                "归档课程没有在任教师，不能重新开课",
            ));
        }
    }

    let affected = service
        .storage
        .set_course_status(id, req.status.clone())
        .await?;
    ensure_affected(affected, "set course status")?;

    info!(
        actor_id = actor.id,
        course_id = id,
        from = %course.status,
        to = %req.status,
        "课程状态已变更"
    );
    ensure_found(service.storage.get_course_by_id(id).await?, "course")
}
