use super::{QuestionService, question_scope};
use crate::errors::Result;
use crate::models::questions::{requests::QuestionListQuery, responses::QuestionListResponse};
use crate::policy::{Action, Actor, Resource, evaluate};

pub(super) async fn list_questions(
    service: &QuestionService,
    actor: &Actor,
    mut query: QuestionListQuery,
) -> Result<QuestionListResponse> {
    crate::services::require_approved(actor)?;
    if !actor.is_admin() {
        match query.course_id {
            // 指定课程时按课程关系决策
            Some(course_id) => {
                let course = question_scope(service, actor, Some(course_id)).await?;
                evaluate(actor, Action::Read, &Resource::Question { course })
                    .require("list course questions")?;
            }
            // 未指定课程的非管理员只能翻全局题库
            None => query.global_only = Some(true),
        }
    }

    service.storage.list_questions_with_pagination(query).await
}
