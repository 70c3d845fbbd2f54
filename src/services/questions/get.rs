use super::{QuestionService, question_scope};
use crate::errors::Result;
use crate::models::questions::entities::Question;
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::ensure_found;

pub(super) async fn get_question(
    service: &QuestionService,
    actor: &Actor,
    id: i64,
) -> Result<Question> {
    let question = ensure_found(service.storage.get_question_by_id(id).await?, "question")?;

    let course = question_scope(service, actor, question.course_id).await?;
    evaluate(actor, Action::Read, &Resource::Question { course }).require("read question")?;

    Ok(question)
}
