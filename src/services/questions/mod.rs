//! 题库服务
//!
//! 题目分两类：挂在课程下的课程题，和 course_id 为空的全局共享题。
//! 题型一旦被任何提交作答引用即冻结，防止已有答案的语义漂移。

mod create;
mod delete;
mod get;
mod list;
mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::questions::{
    entities::Question,
    requests::{CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
    responses::QuestionListResponse,
};
use crate::policy::{Actor, CourseScope};
use crate::storage::{Storage, ensure_found};

pub struct QuestionService {
    storage: Arc<dyn Storage>,
}

impl QuestionService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create_question(
        &self,
        actor: &Actor,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        create::create_question(self, actor, req).await
    }

    pub async fn get_question(&self, actor: &Actor, id: i64) -> Result<Question> {
        get::get_question(self, actor, id).await
    }

    pub async fn list_questions(
        &self,
        actor: &Actor,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        list::list_questions(self, actor, query).await
    }

    pub async fn update_question(
        &self,
        actor: &Actor,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Question> {
        update::update_question(self, actor, id, update).await
    }

    pub async fn delete_question(&self, actor: &Actor, id: i64) -> Result<()> {
        delete::delete_question(self, actor, id).await
    }
}

/// 题目所属课程的上下文；全局题返回 None
pub(super) async fn question_scope(
    service: &QuestionService,
    actor: &Actor,
    course_id: Option<i64>,
) -> Result<Option<CourseScope>> {
    match course_id {
        None => Ok(None),
        Some(course_id) => {
            let course = ensure_found(
                service.storage.get_course_by_id(course_id).await?,
                "course",
            )?;
            let relation = super::course_relation(&service.storage, course_id, actor).await?;
            Ok(Some(CourseScope::new(course.status, relation)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::questions::entities::QuestionType;
    use crate::models::profiles::entities::{ApprovalStatus, ProfileRole};
    use crate::services::testing::{
        actor_of, memory_storage, seed_active_course, seed_approved, seed_profile,
    };
    use std::collections::BTreeMap;

    fn short_text(course_id: Option<i64>, content: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            course_id,
            content: content.to_string(),
            question_type: QuestionType::ShortText,
            rubric: Some("清晰准确即可得分".to_string()),
            options: None,
        }
    }

    #[tokio::test]
    async fn test_global_questions_readable_by_everyone() {
        let storage = memory_storage().await;
        let service = QuestionService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;

        let question = service
            .create_question(&actor_of(&leader), short_text(None, "什么是安全电压？"))
            .await
            .unwrap();

        let seen = service
            .get_question(&actor_of(&student), question.id)
            .await
            .unwrap();
        assert!(seen.is_global());

        // 全局题库学生不可写
        let err = service
            .update_question(
                &actor_of(&student),
                question.id,
                UpdateQuestionRequest {
                    content: Some("改掉".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::RoleForbidden(_)));
    }

    #[tokio::test]
    async fn test_unapproved_actor_cannot_browse_question_bank() {
        let storage = memory_storage().await;
        let service = QuestionService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        service
            .create_question(&actor_of(&leader), short_text(None, "什么是安全电压？"))
            .await
            .unwrap();
        let pending = seed_profile(
            &storage,
            "pending@example.com",
            ProfileRole::Student,
            ApprovalStatus::Pending,
        )
        .await;

        // 全局题库对未审批主体同样关闭
        let err = service
            .list_questions(&actor_of(&pending), QuestionListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
    }

    #[tokio::test]
    async fn test_course_question_hidden_from_outsiders() {
        let storage = memory_storage().await;
        let service = QuestionService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let outsider = seed_approved(&storage, "outsider@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;

        let question = service
            .create_question(
                &actor_of(&leader),
                short_text(Some(course.id), "车床对刀步骤"),
            )
            .await
            .unwrap();

        let err = service
            .get_question(&actor_of(&outsider), question.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_question_type_frozen_once_answered() {
        let storage = memory_storage().await;
        let service = QuestionService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let question = service
            .create_question(
                &actor_of(&leader),
                short_text(Some(course.id), "简述焊接安全规范"),
            )
            .await
            .unwrap();

        let assignment = storage
            .create_assignment(
                leader.id,
                crate::models::assignments::requests::CreateAssignmentRequest {
                    course_id: course.id,
                    title: "第一次作业".to_string(),
                    description: None,
                    question_ids: vec![question.id],
                    due_at: None,
                },
            )
            .await
            .unwrap();

        // 尚无作答时题型可改
        let updated = service
            .update_question(
                &actor_of(&leader),
                question.id,
                UpdateQuestionRequest {
                    question_type: Some(QuestionType::LongText),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.question_type, QuestionType::LongText);

        let mut answers = BTreeMap::new();
        answers.insert(question.id, "先检查接地".to_string());
        storage
            .merge_draft_answers(assignment.id, student.id, answers)
            .await
            .unwrap();

        // 有作答后题型冻结
        let err = service
            .update_question(
                &actor_of(&leader),
                question.id,
                UpdateQuestionRequest {
                    question_type: Some(QuestionType::ShortText),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));

        // 不动题型的更新不受影响
        service
            .update_question(
                &actor_of(&leader),
                question.id,
                UpdateQuestionRequest {
                    content: Some("简述焊接与切割安全规范".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_multiple_choice_requires_options() {
        let storage = memory_storage().await;
        let service = QuestionService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;

        let err = service
            .create_question(
                &actor_of(&leader),
                CreateQuestionRequest {
                    course_id: None,
                    content: "以下哪项正确？".to_string(),
                    question_type: QuestionType::MultipleChoice,
                    rubric: None,
                    options: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_answered_question_cannot_be_deleted() {
        let storage = memory_storage().await;
        let service = QuestionService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let question = service
            .create_question(&actor_of(&leader), short_text(Some(course.id), "气压检查"))
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(
                leader.id,
                crate::models::assignments::requests::CreateAssignmentRequest {
                    course_id: course.id,
                    title: "作业".to_string(),
                    description: None,
                    question_ids: vec![question.id],
                    due_at: None,
                },
            )
            .await
            .unwrap();

        let mut answers = BTreeMap::new();
        answers.insert(question.id, "每班开始前".to_string());
        storage
            .merge_draft_answers(assignment.id, student.id, answers)
            .await
            .unwrap();

        let err = service
            .delete_question(&actor_of(&leader), question.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));
    }
}
