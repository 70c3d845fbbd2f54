use super::{EnrollmentService, require_course_manager};
use crate::errors::Result;
use crate::models::enrollments::{
    requests::EnrollmentListQuery, responses::EnrollmentListResponse,
};
use crate::policy::Actor;

pub(super) async fn list_enrollments(
    service: &EnrollmentService,
    actor: &Actor,
    course_id: i64,
    query: EnrollmentListQuery,
) -> Result<EnrollmentListResponse> {
    require_course_manager(service, actor, course_id).await?;

    service
        .storage
        .list_enrollments_with_pagination(course_id, query)
        .await
}
