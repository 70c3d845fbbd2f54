use tracing::info;

use super::{AssignmentService, assignment_scope};
use crate::errors::Result;
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::{ensure_affected, ensure_found};

pub(super) async fn delete_assignment(
    service: &AssignmentService,
    actor: &Actor,
    id: i64,
) -> Result<()> {
    let assignment = ensure_found(
        service.storage.get_assignment_by_id(id).await?,
        "assignment",
    )?;

    let course = assignment_scope(service, actor, assignment.course_id).await?;
    evaluate(actor, Action::Delete, &Resource::Assignment { course })
        .require("delete assignment")?;

    let affected = service.storage.delete_assignment(id).await?;
    ensure_affected(affected, "delete assignment")?;

    info!(actor_id = actor.id, assignment_id = id, "作业已删除");
    Ok(())
}
