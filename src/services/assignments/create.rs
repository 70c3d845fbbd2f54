use tracing::info;

use super::{AssignmentService, assignment_scope, validate_question_refs};
use crate::errors::{Result, VocademyError};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::policy::{Action, Actor, Resource, evaluate};

pub(super) async fn create_assignment(
    service: &AssignmentService,
    actor: &Actor,
    req: CreateAssignmentRequest,
) -> Result<Assignment> {
    let course = assignment_scope(service, actor, req.course_id).await?;
    evaluate(actor, Action::Create, &Resource::Assignment { course })
        .require("create assignment")?;

    if req.title.trim().is_empty() {
        return Err(VocademyError::validation("作业标题不能为空"));
    }
    validate_question_refs(service, req.course_id, &req.question_ids).await?;

    let assignment = service.storage.create_assignment(actor.id, req).await?;
    info!(
        actor_id = actor.id,
        assignment_id = assignment.id,
        course_id = assignment.course_id,
        questions = assignment.question_ids.len(),
        "作业已创建"
    );
    Ok(assignment)
}
