use super::{CourseService, course_resource};
use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::policy::{Action, Actor, evaluate};
use crate::storage::ensure_found;

pub(super) async fn get_course(
    service: &CourseService,
    actor: &Actor,
    id: i64,
) -> Result<Course> {
    let course = ensure_found(service.storage.get_course_by_id(id).await?, "course")?;

    let resource = course_resource(service, actor, &course, false).await?;
    evaluate(actor, Action::Read, &resource).require("read course")?;

    Ok(course)
}
