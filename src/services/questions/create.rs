use tracing::info;

use super::{QuestionService, question_scope};
use crate::errors::{Result, VocademyError};
use crate::models::questions::{
    entities::{Question, QuestionType},
    requests::CreateQuestionRequest,
};
use crate::policy::{Action, Actor, Resource, evaluate};

pub(super) async fn create_question(
    service: &QuestionService,
    actor: &Actor,
    req: CreateQuestionRequest,
) -> Result<Question> {
    let course = question_scope(service, actor, req.course_id).await?;
    evaluate(actor, Action::Create, &Resource::Question { course })
        .require("create question")?;

    if req.content.trim().is_empty() {
        return Err(VocademyError::validation("题目内容不能为空"));
    }
    if req.question_type == QuestionType::MultipleChoice
        && req.options.as_ref().map(|o| o.len()).unwrap_or(0) < 2
    {
        return Err(VocademyError::validation("选择题至少需要两个选项"));
    }

    let question = service.storage.create_question(actor.id, req).await?;
    info!(
        actor_id = actor.id,
        question_id = question.id,
        global = question.is_global(),
        "题目已创建"
    );
    Ok(question)
}
