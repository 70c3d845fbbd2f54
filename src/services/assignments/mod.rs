//! 作业服务
//!
//! 作业必须归属一门课程，引用题目 ID 的有序列表。
//! 课程题只能被本课程的作业引用，全局题不受限。

mod create;
mod delete;
mod get;
mod list;
mod update;

use std::sync::Arc;

use crate::errors::{Result, VocademyError};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentListResponse,
};
use crate::policy::{Actor, CourseScope};
use crate::storage::{Storage, ensure_found};

pub struct AssignmentService {
    storage: Arc<dyn Storage>,
}

impl AssignmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create_assignment(
        &self,
        actor: &Actor,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, actor, req).await
    }

    pub async fn get_assignment(&self, actor: &Actor, id: i64) -> Result<Assignment> {
        get::get_assignment(self, actor, id).await
    }

    pub async fn list_assignments(
        &self,
        actor: &Actor,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        list::list_assignments(self, actor, query).await
    }

    pub async fn update_assignment(
        &self,
        actor: &Actor,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Assignment> {
        update::update_assignment(self, actor, id, update).await
    }

    pub async fn delete_assignment(&self, actor: &Actor, id: i64) -> Result<()> {
        delete::delete_assignment(self, actor, id).await
    }
}

pub(super) async fn assignment_scope(
    service: &AssignmentService,
    actor: &Actor,
    course_id: i64,
) -> Result<CourseScope> {
    let course = ensure_found(service.storage.get_course_by_id(course_id).await?, "course")?;
    let relation = super::course_relation(&service.storage, course_id, actor).await?;
    Ok(CourseScope::new(course.status, relation))
}

/// 校验作业引用的题目：必须存在，且课程题只能来自本课程
pub(super) async fn validate_question_refs(
    service: &AssignmentService,
    course_id: i64,
    question_ids: &[i64],
) -> Result<()> {
    if question_ids.is_empty() {
        return Err(VocademyError::validation("作业至少需要一道题目"));
    }

    for question_id in question_ids {
        let question = service
            .storage
            .get_question_by_id(*question_id)
            .await?
            .ok_or_else(|| {
                VocademyError::validation(format!("题目 {question_id} 不存在"))
            })?;
        if let Some(question_course) = question.course_id
            && question_course != course_id
        {
            return Err(VocademyError::validation(format!(
                "题目 {question_id} 属于其他课程，不能被本课程作业引用"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::profiles::entities::{ApprovalStatus, ProfileRole};
    use crate::models::questions::{entities::QuestionType, requests::CreateQuestionRequest};
    use crate::services::testing::{
        actor_of, memory_storage, seed_active_course, seed_approved, seed_profile,
    };

    async fn seed_question(
        storage: &Arc<dyn Storage>,
        creator_id: i64,
        course_id: Option<i64>,
    ) -> i64 {
        storage
            .create_question(
                creator_id,
                CreateQuestionRequest {
                    course_id,
                    content: "测验题".to_string(),
                    question_type: QuestionType::ShortText,
                    rubric: None,
                    options: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_unapproved_actor_cannot_list_assignments() {
        let storage = memory_storage().await;
        let service = AssignmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let course = seed_active_course(&storage, &leader).await;
        let pending = seed_profile(
            &storage,
            "pending@example.com",
            ProfileRole::Student,
            ApprovalStatus::Pending,
        )
        .await;

        let err = service
            .list_assignments(
                &actor_of(&pending),
                AssignmentListQuery {
                    course_id: Some(course.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
    }

    #[tokio::test]
    async fn test_create_assignment_with_valid_questions() {
        let storage = memory_storage().await;
        let service = AssignmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let course = seed_active_course(&storage, &leader).await;
        let q1 = seed_question(&storage, leader.id, Some(course.id)).await;
        let q2 = seed_question(&storage, leader.id, None).await;

        let assignment = service
            .create_assignment(
                &actor_of(&leader),
                CreateAssignmentRequest {
                    course_id: course.id,
                    title: "期中作业".to_string(),
                    description: None,
                    question_ids: vec![q1, q2],
                    due_at: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(assignment.question_ids, vec![q1, q2]);
    }

    #[tokio::test]
    async fn test_foreign_course_question_rejected() {
        let storage = memory_storage().await;
        let service = AssignmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let other = seed_approved(&storage, "other@example.com", ProfileRole::CourseLeader).await;
        let course = seed_active_course(&storage, &leader).await;
        let foreign_course = seed_active_course(&storage, &other).await;
        let foreign_q = seed_question(&storage, other.id, Some(foreign_course.id)).await;

        let err = service
            .create_assignment(
                &actor_of(&leader),
                CreateAssignmentRequest {
                    course_id: course.id,
                    title: "坏作业".to_string(),
                    description: None,
                    question_ids: vec![foreign_q],
                    due_at: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_enrolled_student_reads_assignment() {
        let storage = memory_storage().await;
        let service = AssignmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let outsider = seed_approved(&storage, "outsider@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();
        let q = seed_question(&storage, leader.id, None).await;

        let assignment = service
            .create_assignment(
                &actor_of(&leader),
                CreateAssignmentRequest {
                    course_id: course.id,
                    title: "阅读作业".to_string(),
                    description: None,
                    question_ids: vec![q],
                    due_at: None,
                },
            )
            .await
            .unwrap();

        let seen = service
            .get_assignment(&actor_of(&student), assignment.id)
            .await
            .unwrap();
        assert_eq!(seen.id, assignment.id);

        // 未选课学生对作业不可见
        let err = service
            .get_assignment(&actor_of(&outsider), assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_students_cannot_write_assignments() {
        let storage = memory_storage().await;
        let service = AssignmentService::new(storage.clone());
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();
        let q = seed_question(&storage, leader.id, None).await;

        let assignment = service
            .create_assignment(
                &actor_of(&leader),
                CreateAssignmentRequest {
                    course_id: course.id,
                    title: "作业".to_string(),
                    description: None,
                    question_ids: vec![q],
                    due_at: None,
                },
            )
            .await
            .unwrap();

        let err = service
            .update_assignment(
                &actor_of(&student),
                assignment.id,
                UpdateAssignmentRequest {
                    title: Some("改名".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::RoleForbidden(_)));
    }
}
