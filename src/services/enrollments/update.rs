use tracing::info;

use super::{EnrollmentService, require_course_manager};
use crate::errors::{Result, VocademyError};
use crate::models::enrollments::{entities::Enrollment, requests::UpdateEnrollmentRequest};
use crate::policy::Actor;
use crate::storage::ensure_found;

pub(super) async fn update_enrollment(
    service: &EnrollmentService,
    actor: &Actor,
    course_id: i64,
    student_id: i64,
    update: UpdateEnrollmentRequest,
) -> Result<Enrollment> {
    require_course_manager(service, actor, course_id).await?;

    if let Some(progress) = update.progress
        && !(0.0..=100.0).contains(&progress)
    {
        return Err(VocademyError::validation("进度必须在 0 到 100 之间"));
    }

    let enrollment = ensure_found(
        service
            .storage
            .update_enrollment(course_id, student_id, update)
            .await?,
        "enrollment",
    )?;

    info!(
        actor_id = actor.id,
        course_id,
        student_id,
        status = %enrollment.status,
        "选课记录已更新"
    );
    Ok(enrollment)
}
