use tracing::info;

use super::{CourseService, course_resource};
use crate::errors::{Result, VocademyError};
use crate::models::courses::{entities::Course, requests::UpdateCourseRequest};
use crate::policy::{Action, Actor, evaluate};
use crate::storage::ensure_found;

pub(super) async fn update_course(
    service: &CourseService,
    actor: &Actor,
    id: i64,
    update: UpdateCourseRequest,
) -> Result<Course> {
    let course = ensure_found(service.storage.get_course_by_id(id).await?, "course")?;

    let resource = course_resource(service, actor, &course, false).await?;
    evaluate(actor, Action::Update, &resource).require("update course")?;

    if let Some(capacity) = update.capacity
        && capacity <= 0
    {
        return Err(VocademyError::validation("课程容量必须为正数"));
    }

    let updated = ensure_found(service.storage.update_course(id, update).await?, "course")?;
    info!(actor_id = actor.id, course_id = id, "课程已更新");
    Ok(updated)
}
