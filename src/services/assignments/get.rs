use super::{AssignmentService, assignment_scope};
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::ensure_found;

pub(super) async fn get_assignment(
    service: &AssignmentService,
    actor: &Actor,
    id: i64,
) -> Result<Assignment> {
    let assignment = ensure_found(
        service.storage.get_assignment_by_id(id).await?,
        "assignment",
    )?;

    let course = assignment_scope(service, actor, assignment.course_id).await?;
    evaluate(actor, Action::Read, &Resource::Assignment { course }).require("read assignment")?;

    Ok(assignment)
}
