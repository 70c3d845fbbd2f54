//! 提交生命周期服务
//!
//! 提交状态单调推进：draft -> submitted -> graded，没有回退。
//! 草稿保存是键级合并，提交时做完整性检查，提交后答案冻结。

mod detail;
mod list;
mod submit;
mod upsert_draft;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::{SubmissionListQuery, UpsertDraftRequest},
    responses::{SubmissionDetailResponse, SubmissionListResponse},
};
use crate::oracle::ScoringOracle;
use crate::policy::{Actor, CourseScope, Resource};
use crate::storage::{Storage, ensure_found};

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    oracle: Arc<dyn ScoringOracle>,
    // 为 true 时允许提交缺答的作业
    allow_partial: bool,
    // 为 true 时提交成功后同步触发 AI 评分
    auto_assess: bool,
}

impl SubmissionService {
    pub fn new(
        storage: Arc<dyn Storage>,
        oracle: Arc<dyn ScoringOracle>,
        allow_partial: bool,
        auto_assess: bool,
    ) -> Self {
        Self {
            storage,
            oracle,
            allow_partial,
            auto_assess,
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, oracle: Arc<dyn ScoringOracle>) -> Self {
        let config = AppConfig::get();
        Self::new(
            storage,
            oracle,
            config.submission.allow_partial,
            config.oracle.auto_assess,
        )
    }

    pub async fn upsert_draft(
        &self,
        actor: &Actor,
        assignment_id: i64,
        req: UpsertDraftRequest,
    ) -> Result<Submission> {
        upsert_draft::upsert_draft(self, actor, assignment_id, req).await
    }

    pub async fn submit(&self, actor: &Actor, assignment_id: i64) -> Result<Submission> {
        submit::submit(self, actor, assignment_id).await
    }

    pub async fn get_detail(
        &self,
        actor: &Actor,
        submission_id: i64,
    ) -> Result<SubmissionDetailResponse> {
        detail::get_detail(self, actor, submission_id).await
    }

    pub async fn list_submissions(
        &self,
        actor: &Actor,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        list::list_submissions(self, actor, query).await
    }
}

/// 构建提交的策略资源描述符，关系事实一并查好
pub(super) async fn submission_resource(
    service: &SubmissionService,
    actor: &Actor,
    assignment: &Assignment,
    student_id: i64,
    status: SubmissionStatus,
    grading: bool,
) -> Result<Resource> {
    let course = ensure_found(
        service.storage.get_course_by_id(assignment.course_id).await?,
        "course",
    )?;
    let relation = super::course_relation(&service.storage, assignment.course_id, actor).await?;
    Ok(Resource::Submission {
        student_id,
        status,
        course: CourseScope::new(course.status, relation),
        grading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::profiles::entities::{ApprovalStatus, Profile, ProfileRole};
    use crate::models::questions::{entities::QuestionType, requests::CreateQuestionRequest};
    use crate::oracle::testing::{FailingOracle, FixedOracle};
    use crate::services::testing::{
        actor_of, memory_storage, seed_active_course, seed_approved, seed_profile,
    };
    use std::collections::BTreeMap;

    struct Fixture {
        storage: Arc<dyn Storage>,
        leader: Profile,
        student: Profile,
        assignment: Assignment,
        question_ids: Vec<i64>,
    }

    /// 一门 active 课程、一名在读学生、一份两道题的作业
    async fn two_question_fixture() -> Fixture {
        let storage = memory_storage().await;
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let mut question_ids = Vec::new();
        for content in ["简述断路器的作用", "列出三种常见的绝缘材料"] {
            let q = storage
                .create_question(
                    leader.id,
                    CreateQuestionRequest {
                        course_id: Some(course.id),
                        content: content.to_string(),
                        question_type: QuestionType::ShortText,
                        rubric: Some("要点齐全".to_string()),
                        options: None,
                    },
                )
                .await
                .unwrap();
            question_ids.push(q.id);
        }

        let assignment = storage
            .create_assignment(
                leader.id,
                CreateAssignmentRequest {
                    course_id: course.id,
                    title: "电工基础第一次作业".to_string(),
                    description: None,
                    question_ids: question_ids.clone(),
                    due_at: None,
                },
            )
            .await
            .unwrap();

        Fixture {
            storage,
            leader,
            student,
            assignment,
            question_ids,
        }
    }

    fn strict_service(storage: Arc<dyn Storage>) -> SubmissionService {
        SubmissionService::new(storage, Arc::new(FailingOracle), false, false)
    }

    fn answers(pairs: &[(i64, &str)]) -> UpsertDraftRequest {
        UpsertDraftRequest {
            answers: pairs.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    #[tokio::test]
    async fn test_draft_merge_is_keywise_union() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let actor = actor_of(&fx.student);
        let [q1, q2] = [fx.question_ids[0], fx.question_ids[1]];

        service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "分断故障电流")]))
            .await
            .unwrap();
        // 第二次只带另一道题，第一道的答案必须保留
        let merged = service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q2, "橡胶、陶瓷、云母")]))
            .await
            .unwrap();

        assert_eq!(merged.answers.len(), 2);
        assert_eq!(merged.answers[&q1], "分断故障电流");
        assert_eq!(merged.answers[&q2], "橡胶、陶瓷、云母");
        assert_eq!(merged.status, SubmissionStatus::Draft);
    }

    #[tokio::test]
    async fn test_draft_merge_same_key_overwrites() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let actor = actor_of(&fx.student);
        let q1 = fx.question_ids[0];

        service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "初稿")]))
            .await
            .unwrap();
        let merged = service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "修订稿")]))
            .await
            .unwrap();
        assert_eq!(merged.answers[&q1], "修订稿");
    }

    #[tokio::test]
    async fn test_unknown_question_key_rejected() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let actor = actor_of(&fx.student);

        let err = service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(99999, "乱写")]))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_incomplete_submit_lists_missing_questions() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let actor = actor_of(&fx.student);
        let [q1, q2] = [fx.question_ids[0], fx.question_ids[1]];

        service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "分断故障电流")]))
            .await
            .unwrap();

        let err = service.submit(&actor, fx.assignment.id).await.unwrap_err();
        match err {
            VocademyError::IncompleteSubmission(msg) => {
                assert!(msg.contains(&q2.to_string()));
            }
            other => panic!("expected IncompleteSubmission, got {other:?}"),
        }

        // 提交失败后草稿仍可继续编辑
        let still_draft = fx
            .storage
            .get_submission(fx.assignment.id, fx.student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(still_draft.status, SubmissionStatus::Draft);
    }

    #[tokio::test]
    async fn test_partial_submit_allowed_when_configured() {
        let fx = two_question_fixture().await;
        let service = SubmissionService::new(
            fx.storage.clone(),
            Arc::new(FailingOracle),
            true,
            false,
        );
        let actor = actor_of(&fx.student);
        let q1 = fx.question_ids[0];

        service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "只答一题")]))
            .await
            .unwrap();
        let submitted = service.submit(&actor, fx.assignment.id).await.unwrap();
        assert_eq!(submitted.status, SubmissionStatus::Submitted);
        assert!(submitted.submitted_at.is_some());
    }

    #[tokio::test]
    async fn test_submitted_answers_are_frozen() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let actor = actor_of(&fx.student);
        let [q1, q2] = [fx.question_ids[0], fx.question_ids[1]];

        service
            .upsert_draft(
                &actor,
                fx.assignment.id,
                answers(&[(q1, "分断故障电流"), (q2, "橡胶、陶瓷、云母")]),
            )
            .await
            .unwrap();
        service.submit(&actor, fx.assignment.id).await.unwrap();

        let err = service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "偷偷改")]))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::SubmissionLocked(_)));

        // 答案保持提交时的内容
        let frozen = fx
            .storage
            .get_submission(fx.assignment.id, fx.student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(frozen.answers[&q1], "分断故障电流");

        // 重复提交同样被锁拒绝
        let err = service.submit(&actor, fx.assignment.id).await.unwrap_err();
        assert!(matches!(err, VocademyError::SubmissionLocked(_)));
    }

    #[tokio::test]
    async fn test_submit_without_draft_is_not_found() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());

        let err = service
            .submit(&actor_of(&fx.student), fx.assignment.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_auto_assess_records_verdict_on_submit() {
        let fx = two_question_fixture().await;
        let oracle = Arc::new(FixedOracle::scoring(87.5));
        let service =
            SubmissionService::new(fx.storage.clone(), oracle.clone(), false, true);
        let actor = actor_of(&fx.student);
        let [q1, q2] = [fx.question_ids[0], fx.question_ids[1]];

        service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "a"), (q2, "b")]))
            .await
            .unwrap();
        let submitted = service.submit(&actor, fx.assignment.id).await.unwrap();

        assert_eq!(*oracle.calls.lock().unwrap(), 1);
        let assessment = fx
            .storage
            .get_ai_assessment(submitted.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assessment.score, 87.5);
        assert!(assessment.request_id.is_some());
    }

    #[tokio::test]
    async fn test_oracle_failure_leaves_submission_submitted() {
        let fx = two_question_fixture().await;
        let service = SubmissionService::new(
            fx.storage.clone(),
            Arc::new(FailingOracle),
            false,
            true,
        );
        let actor = actor_of(&fx.student);
        let [q1, q2] = [fx.question_ids[0], fx.question_ids[1]];

        service
            .upsert_draft(&actor, fx.assignment.id, answers(&[(q1, "a"), (q2, "b")]))
            .await
            .unwrap();
        // 预言机失败不回滚提交
        let submitted = service.submit(&actor, fx.assignment.id).await.unwrap();
        assert_eq!(submitted.status, SubmissionStatus::Submitted);
        assert!(
            fx.storage
                .get_ai_assessment(submitted.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_foreign_draft_invisible_and_unwritable() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let outsider =
            seed_approved(&fx.storage, "outsider@example.com", ProfileRole::Student).await;
        let q1 = fx.question_ids[0];

        service
            .upsert_draft(
                &actor_of(&fx.student),
                fx.assignment.id,
                answers(&[(q1, "我的答案")]),
            )
            .await
            .unwrap();

        // 未选课学生既写不了也看不到
        let err = service
            .upsert_draft(&actor_of(&outsider), fx.assignment.id, answers(&[(q1, "x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));

        let submission = fx
            .storage
            .get_submission(fx.assignment.id, fx.student.id)
            .await
            .unwrap()
            .unwrap();
        let err = service
            .get_detail(&actor_of(&outsider), submission.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));

        // 课程教师可以读
        let detail = service
            .get_detail(&actor_of(&fx.leader), submission.id)
            .await
            .unwrap();
        assert_eq!(detail.submission.id, submission.id);
    }

    #[tokio::test]
    async fn test_suspended_enrollment_blocks_draft_writes() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let q1 = fx.question_ids[0];

        fx.storage
            .update_enrollment(
                fx.assignment.course_id,
                fx.student.id,
                crate::models::enrollments::requests::UpdateEnrollmentRequest {
                    status: Some(crate::models::enrollments::entities::EnrollmentStatus::Suspended),
                    progress: None,
                },
            )
            .await
            .unwrap();

        let err = service
            .upsert_draft(&actor_of(&fx.student), fx.assignment.id, answers(&[(q1, "x")]))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotEnrolled(_)));
    }

    #[tokio::test]
    async fn test_student_listing_scoped_to_own_submissions() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());
        let second = seed_approved(&fx.storage, "second@example.com", ProfileRole::Student).await;
        fx.storage
            .enroll_student(fx.assignment.course_id, second.id)
            .await
            .unwrap();
        let q1 = fx.question_ids[0];

        service
            .upsert_draft(&actor_of(&fx.student), fx.assignment.id, answers(&[(q1, "a")]))
            .await
            .unwrap();
        service
            .upsert_draft(&actor_of(&second), fx.assignment.id, answers(&[(q1, "b")]))
            .await
            .unwrap();

        let mine = service
            .list_submissions(
                &actor_of(&fx.student),
                SubmissionListQuery {
                    assignment_id: Some(fx.assignment.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(mine.items.len(), 1);
        assert_eq!(mine.items[0].student_id, fx.student.id);

        // 课程教师看到整个作业的提交
        let all = service
            .list_submissions(
                &actor_of(&fx.leader),
                SubmissionListQuery {
                    assignment_id: Some(fx.assignment.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(all.items.len(), 2);
    }

    #[tokio::test]
    async fn test_unapproved_actors_cannot_list_submissions() {
        let fx = two_question_fixture().await;
        let service = strict_service(fx.storage.clone());

        let pending_student = seed_profile(
            &fx.storage,
            "pendingstudent@example.com",
            ProfileRole::Student,
            ApprovalStatus::Pending,
        )
        .await;
        let err = service
            .list_submissions(&actor_of(&pending_student), SubmissionListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));

        // 管理员短路同样排在审批门禁之后
        let pending_admin = seed_profile(
            &fx.storage,
            "pendingadmin@example.com",
            ProfileRole::Admin,
            ApprovalStatus::Pending,
        )
        .await;
        let err = service
            .list_submissions(&actor_of(&pending_admin), SubmissionListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
    }

    #[tokio::test]
    async fn test_concurrent_first_saves_leave_single_submission() {
        let fx = two_question_fixture().await;
        let service = Arc::new(strict_service(fx.storage.clone()));
        let actor = actor_of(&fx.student);
        let q1 = fx.question_ids[0];

        let mut handles = Vec::new();
        for i in 0..4 {
            let service = service.clone();
            let actor = actor.clone();
            let assignment_id = fx.assignment.id;
            handles.push(tokio::spawn(async move {
                let text = format!("第{i}稿");
                service
                    .upsert_draft(&actor, assignment_id, answers(&[(q1, text.as_str())]))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // 唯一索引兜底，最终只有一行提交
        let listed = fx
            .storage
            .list_submissions_with_pagination(
                None,
                SubmissionListQuery {
                    assignment_id: Some(fx.assignment.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 1);
        assert!(listed.items[0].answers.contains_key(&q1));
        assert_eq!(listed.items[0].status, SubmissionStatus::Draft);
    }

    #[tokio::test]
    async fn test_concurrent_disjoint_saves_merge_to_union() {
        let fx = two_question_fixture().await;
        let service = Arc::new(strict_service(fx.storage.clone()));
        let actor = actor_of(&fx.student);
        let [q1, q2] = [fx.question_ids[0], fx.question_ids[1]];
        let assignment_id = fx.assignment.id;

        let first = {
            let service = service.clone();
            let actor = actor.clone();
            tokio::spawn(async move {
                service
                    .upsert_draft(&actor, assignment_id, answers(&[(q1, "分断故障电流")]))
                    .await
            })
        };
        let second = {
            let service = service.clone();
            let actor = actor.clone();
            tokio::spawn(async move {
                service
                    .upsert_draft(&actor, assignment_id, answers(&[(q2, "橡胶与陶瓷")]))
                    .await
            })
        };
        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        // 两次保存互不相交，键全部保留
        let merged = fx
            .storage
            .get_submission(assignment_id, fx.student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(merged.answers.len(), 2);
        assert_eq!(merged.answers[&q1], "分断故障电流");
        assert_eq!(merged.answers[&q2], "橡胶与陶瓷");
        assert_eq!(merged.status, SubmissionStatus::Draft);
    }
}
