use tracing::info;

use super::{EnrollmentService, require_course_manager};
use crate::errors::{Result, VocademyError};
use crate::models::enrollments::{entities::Enrollment, requests::EnrollStudentRequest};
use crate::models::profiles::entities::ProfileRole;
use crate::policy::Actor;
use crate::storage::ensure_found;

pub(super) async fn enroll_student(
    service: &EnrollmentService,
    actor: &Actor,
    course_id: i64,
    req: EnrollStudentRequest,
) -> Result<Enrollment> {
    require_course_manager(service, actor, course_id).await?;

    let course = ensure_found(service.storage.get_course_by_id(course_id).await?, "course")?;

    let student = ensure_found(
        service.storage.get_profile_by_id(req.student_id).await?,
        "student",
    )?;
    if student.role != ProfileRole::Student {
        return Err(VocademyError::validation("只有学生角色可以被选入课程"));
    }
    if !student.is_approved() {
        return Err(VocademyError::validation("学生账号尚未通过审批"));
    }

    if service
        .storage
        .get_enrollment(course_id, req.student_id)
        .await?
        .is_some()
    {
        return Err(VocademyError::invalid_state("该学生已有选课记录"));
    }

    let active = service.storage.count_active_enrollments(course_id).await?;
    if active >= course.capacity as u64 {
        return Err(VocademyError::invalid_state(format!(
            "课程容量已满（{}/{}）",
            active, course.capacity
        )));
    }

    let enrollment = service
        .storage
        .enroll_student(course_id, req.student_id)
        .await?;

    info!(
        actor_id = actor.id,
        course_id,
        student_id = req.student_id,
        "学生已选课"
    );
    Ok(enrollment)
}
