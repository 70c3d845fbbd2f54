use tracing::info;

use super::{QuestionService, question_scope};
use crate::errors::{Result, VocademyError};
use crate::models::questions::{entities::Question, requests::UpdateQuestionRequest};
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::ensure_found;

pub(super) async fn update_question(
    service: &QuestionService,
    actor: &Actor,
    id: i64,
    update: UpdateQuestionRequest,
) -> Result<Question> {
    let question = ensure_found(service.storage.get_question_by_id(id).await?, "question")?;

    let course = question_scope(service, actor, question.course_id).await?;
    evaluate(actor, Action::Update, &Resource::Question { course })
        .require("update question")?;

    // 题型被任何提交作答引用后即冻结
    if let Some(ref new_type) = update.question_type
        && *new_type != question.question_type
        && service.storage.question_has_answers(id).await?
    {
        return Err(VocademyError::invalid_state(
            "题目已有作答，题型不可变更",
        ));
    }

    let updated = ensure_found(
        service.storage.update_question(id, update).await?,
        "question",
    )?;
    info!(actor_id = actor.id, question_id = id, "题目已更新");
    Ok(updated)
}
