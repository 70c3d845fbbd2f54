use tracing::info;

use super::{QuestionService, question_scope};
use crate::errors::{Result, VocademyError};
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::{ensure_affected, ensure_found};

pub(super) async fn delete_question(
    service: &QuestionService,
    actor: &Actor,
    id: i64,
) -> Result<()> {
    let question = ensure_found(service.storage.get_question_by_id(id).await?, "question")?;

    let course = question_scope(service, actor, question.course_id).await?;
    evaluate(actor, Action::Delete, &Resource::Question { course })
        .require("delete question")?;

    if service.storage.question_has_answers(id).await? {
        return Err(VocademyError::invalid_state(
            "题目已有作答，不能删除",
        ));
    }

    let affected = service.storage.delete_question(id).await?;
    ensure_affected(affected, "delete question")?;

    info!(actor_id = actor.id, question_id = id, "题目已删除");
    Ok(())
}
