use super::{AssignmentService, assignment_scope};
use crate::errors::{Result, VocademyError};
use crate::models::assignments::{
    requests::AssignmentListQuery, responses::AssignmentListResponse,
};
use crate::policy::{Action, Actor, Resource, evaluate};

pub(super) async fn list_assignments(
    service: &AssignmentService,
    actor: &Actor,
    query: AssignmentListQuery,
) -> Result<AssignmentListResponse> {
    crate::services::require_approved(actor)?;
    if !actor.is_admin() {
        let course_id = query
            .course_id
            .ok_or_else(|| VocademyError::validation("course_id 参数缺失"))?;
        let course = assignment_scope(service, actor, course_id).await?;
        evaluate(actor, Action::Read, &Resource::Assignment { course })
            .require("list assignments")?;
    }

    service.storage.list_assignments_with_pagination(query).await
}
