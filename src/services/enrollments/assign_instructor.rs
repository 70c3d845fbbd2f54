use tracing::info;

use super::{EnrollmentService, require_course_manager};
use crate::errors::{Result, VocademyError};
use crate::models::enrollments::{
    entities::InstructorAssignment, requests::AssignInstructorRequest,
};
use crate::models::profiles::entities::ProfileRole;
use crate::policy::Actor;
use crate::storage::ensure_found;

pub(super) async fn assign_instructor(
    service: &EnrollmentService,
    actor: &Actor,
    course_id: i64,
    req: AssignInstructorRequest,
) -> Result<InstructorAssignment> {
    require_course_manager(service, actor, course_id).await?;

    ensure_found(service.storage.get_course_by_id(course_id).await?, "course")?;

    let instructor = ensure_found(
        service.storage.get_profile_by_id(req.instructor_id).await?,
        "instructor",
    )?;
    if instructor.role == ProfileRole::Student {
        return Err(VocademyError::validation(
            "学生角色不能被指派为授课教师",
        ));
    }
    if !instructor.is_approved() {
        return Err(VocademyError::validation("教师账号尚未通过审批"));
    }

    if service
        .storage
        .get_instructor_assignment(course_id, req.instructor_id)
        .await?
        .is_some()
    {
        return Err(VocademyError::invalid_state("该教师已被指派到本课程"));
    }

    let assignment = service
        .storage
        .assign_instructor(course_id, req.instructor_id, req.role.clone())
        .await?;

    info!(
        actor_id = actor.id,
        course_id,
        instructor_id = req.instructor_id,
        role = %assignment.role,
        "授课教师已指派"
    );
    Ok(assignment)
}
