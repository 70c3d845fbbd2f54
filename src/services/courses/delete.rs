use tracing::info;

use super::{CourseService, course_resource_full};
use crate::errors::{Result, VocademyError};
use crate::policy::{Action, Actor, evaluate};
use crate::storage::{ensure_affected, ensure_found};

pub(super) async fn delete_course(service: &CourseService, actor: &Actor, id: i64) -> Result<()> {
    let course = ensure_found(service.storage.get_course_by_id(id).await?, "course")?;

    let resource = course_resource_full(service, actor, &course, false).await?;
    evaluate(actor, Action::Delete, &resource).require("delete course")?;

    // 前置条件对管理员同样生效：有选课或作业的课程只能归档
    let active_enrollments = service.storage.count_active_enrollments(id).await?;
    let assignments = service.storage.count_course_assignments(id).await?;
    if active_enrollments > 0 || assignments > 0 {
        return Err(VocademyError::invalid_state(format!(
            "课程仍在使用中（{active_enrollments} 条在读选课，{assignments} 份作业），请先归档"
        )));
    }

    let affected = service.storage.delete_course(id).await?;
    ensure_affected(affected, "delete course")?;

    info!(actor_id = actor.id, course_id = id, "课程已删除");
    Ok(())
}
