use tracing::info;

use super::{AssignmentService, assignment_scope, validate_question_refs};
use crate::errors::Result;
use crate::models::assignments::{entities::Assignment, requests::UpdateAssignmentRequest};
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::ensure_found;

pub(super) async fn update_assignment(
    service: &AssignmentService,
    actor: &Actor,
    id: i64,
    update: UpdateAssignmentRequest,
) -> Result<Assignment> {
    let assignment = ensure_found(
        service.storage.get_assignment_by_id(id).await?,
        "assignment",
    )?;

    let course = assignment_scope(service, actor, assignment.course_id).await?;
    evaluate(actor, Action::Update, &Resource::Assignment { course })
        .require("update assignment")?;

    if let Some(ref question_ids) = update.question_ids {
        validate_question_refs(service, assignment.course_id, question_ids).await?;
    }

    let updated = ensure_found(
        service.storage.update_assignment(id, update).await?,
        "assignment",
    )?;
    info!(actor_id = actor.id, assignment_id = id, "作业已更新");
    Ok(updated)
}
