//! 评估聚合服务
//!
//! 一次提交最多一条 AI 评估（一次性写入）和一条最终评分（可覆盖）。
//! 最终评分是权威结论；AI 评估始终作为临时反馈保留展示。

mod final_grade;
mod outcome;
mod trigger;

pub(crate) use trigger::score_submission;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::assessments::{
    entities::{AiAssessment, FinalGrade},
    requests::RecordFinalGradeRequest,
    responses::AssessmentOutcomeResponse,
};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::Submission;
use crate::oracle::ScoringOracle;
use crate::policy::{Actor, CourseScope, Resource};
use crate::storage::{Storage, ensure_found};

pub struct AssessmentService {
    storage: Arc<dyn Storage>,
    oracle: Arc<dyn ScoringOracle>,
}

impl AssessmentService {
    pub fn new(storage: Arc<dyn Storage>, oracle: Arc<dyn ScoringOracle>) -> Self {
        Self { storage, oracle }
    }

    pub async fn trigger_assessment(
        &self,
        actor: &Actor,
        submission_id: i64,
    ) -> Result<AiAssessment> {
        trigger::trigger_assessment(self, actor, submission_id).await
    }

    pub async fn record_final_grade(
        &self,
        actor: &Actor,
        submission_id: i64,
        req: RecordFinalGradeRequest,
    ) -> Result<FinalGrade> {
        final_grade::record_final_grade(self, actor, submission_id, req).await
    }

    pub async fn get_outcome(
        &self,
        actor: &Actor,
        submission_id: i64,
    ) -> Result<AssessmentOutcomeResponse> {
        outcome::get_outcome(self, actor, submission_id).await
    }
}

/// 加载提交及其作业，构建评估路径的策略资源描述符
pub(super) async fn load_submission_context(
    service: &AssessmentService,
    actor: &Actor,
    submission_id: i64,
    grading: bool,
) -> Result<(Submission, Assignment, Resource)> {
    let submission = ensure_found(
        service.storage.get_submission_by_id(submission_id).await?,
        "submission",
    )?;
    let assignment = ensure_found(
        service
            .storage
            .get_assignment_by_id(submission.assignment_id)
            .await?,
        "assignment",
    )?;
    let course = ensure_found(
        service.storage.get_course_by_id(assignment.course_id).await?,
        "course",
    )?;
    let relation =
        super::course_relation(&service.storage, assignment.course_id, actor).await?;

    let resource = Resource::Submission {
        student_id: submission.student_id,
        status: submission.status.clone(),
        course: CourseScope::new(course.status, relation),
        grading,
    };
    Ok((submission, assignment, resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::assessments::entities::GradeStatus;
    use crate::models::assessments::requests::RecordAiAssessmentRequest;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::profiles::entities::{Profile, ProfileRole};
    use crate::models::questions::{entities::QuestionType, requests::CreateQuestionRequest};
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::oracle::testing::{FailingOracle, FixedOracle};
    use crate::services::testing::{
        actor_of, memory_storage, seed_active_course, seed_approved,
    };
    use std::collections::BTreeMap;

    struct Fixture {
        storage: Arc<dyn Storage>,
        leader: Profile,
        student: Profile,
        submission_id: i64,
    }

    /// 一份已提交的单题作业答卷
    async fn submitted_fixture() -> Fixture {
        let storage = memory_storage().await;
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();

        let question = storage
            .create_question(
                leader.id,
                CreateQuestionRequest {
                    course_id: Some(course.id),
                    content: "简述急停按钮的使用场景".to_string(),
                    question_type: QuestionType::ShortText,
                    rubric: Some("覆盖人身与设备风险".to_string()),
                    options: None,
                },
            )
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(
                leader.id,
                CreateAssignmentRequest {
                    course_id: course.id,
                    title: "安全操作作业".to_string(),
                    description: None,
                    question_ids: vec![question.id],
                    due_at: None,
                },
            )
            .await
            .unwrap();

        let mut answers = BTreeMap::new();
        answers.insert(question.id, "设备异常或人员受困时立即按下".to_string());
        let submission = storage
            .merge_draft_answers(assignment.id, student.id, answers)
            .await
            .unwrap();
        assert!(storage.mark_submitted(assignment.id, student.id).await.unwrap());

        Fixture {
            storage,
            leader,
            student,
            submission_id: submission.id,
        }
    }

    fn grade(score: f64) -> RecordFinalGradeRequest {
        RecordFinalGradeRequest {
            score,
            comments: Some("已复核".to_string()),
            status: if score >= 60.0 {
                GradeStatus::Pass
            } else {
                GradeStatus::Fail
            },
        }
    }

    #[tokio::test]
    async fn test_instructor_triggers_assessment_once() {
        let fx = submitted_fixture().await;
        let service =
            AssessmentService::new(fx.storage.clone(), Arc::new(FixedOracle::scoring(72.0)));
        let actor = actor_of(&fx.leader);

        let assessment = service
            .trigger_assessment(&actor, fx.submission_id)
            .await
            .unwrap();
        assert_eq!(assessment.score, 72.0);

        // 二次触发被一次性约束拒绝，首次结果保留
        let err = service
            .trigger_assessment(&actor, fx.submission_id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::AlreadyAssessed(_)));

        let kept = fx
            .storage
            .get_ai_assessment(fx.submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.score, 72.0);
    }

    #[tokio::test]
    async fn test_failed_assessment_can_be_retriggered() {
        let fx = submitted_fixture().await;
        let actor = actor_of(&fx.leader);

        let failing = AssessmentService::new(fx.storage.clone(), Arc::new(FailingOracle));
        let err = failing
            .trigger_assessment(&actor, fx.submission_id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::UpstreamFailure(_)));

        // 失败没有留下评估记录，重触发走得通
        let working =
            AssessmentService::new(fx.storage.clone(), Arc::new(FixedOracle::scoring(65.0)));
        let assessment = working
            .trigger_assessment(&actor, fx.submission_id)
            .await
            .unwrap();
        assert_eq!(assessment.score, 65.0);
    }

    #[tokio::test]
    async fn test_duplicate_ai_assessment_rejected_at_storage() {
        let fx = submitted_fixture().await;

        let req = RecordAiAssessmentRequest {
            score: 80.0,
            feedback: "第一份".to_string(),
            confidence: crate::models::assessments::entities::ConfidenceBucket::High,
        };
        fx.storage
            .insert_ai_assessment(fx.submission_id, req.clone(), None)
            .await
            .unwrap();

        let second = RecordAiAssessmentRequest {
            score: 10.0,
            feedback: "第二份".to_string(),
            ..req
        };
        let err = fx
            .storage
            .insert_ai_assessment(fx.submission_id, second, None)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::AlreadyAssessed(_)));

        let kept = fx
            .storage
            .get_ai_assessment(fx.submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.feedback, "第一份");
    }

    #[tokio::test]
    async fn test_students_cannot_grade_their_own_work() {
        let fx = submitted_fixture().await;
        let service = AssessmentService::new(fx.storage.clone(), Arc::new(FailingOracle));

        let err = service
            .record_final_grade(&actor_of(&fx.student), fx.submission_id, grade(100.0))
            .await
            .unwrap_err();
        // 拥有者知道提交存在，给明确 403
        assert!(matches!(err, VocademyError::RoleForbidden(_)));
    }

    #[tokio::test]
    async fn test_cross_course_instructor_cannot_grade() {
        let fx = submitted_fixture().await;
        let service = AssessmentService::new(fx.storage.clone(), Arc::new(FailingOracle));
        let other = seed_approved(&fx.storage, "other@example.com", ProfileRole::CourseLeader).await;
        seed_active_course(&fx.storage, &other).await;

        // 教师身份在别的课，对这份提交拿到 404
        let err = service
            .record_final_grade(&actor_of(&other), fx.submission_id, grade(90.0))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_final_grade_marks_submission_graded() {
        let fx = submitted_fixture().await;
        let service = AssessmentService::new(fx.storage.clone(), Arc::new(FailingOracle));
        let actor = actor_of(&fx.leader);

        let final_grade = service
            .record_final_grade(&actor, fx.submission_id, grade(88.0))
            .await
            .unwrap();
        assert_eq!(final_grade.status, GradeStatus::Pass);
        assert_eq!(final_grade.grader_id, fx.leader.id);

        let submission = fx
            .storage
            .get_submission_by_id(fx.submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(submission.status, SubmissionStatus::Graded);
    }

    #[tokio::test]
    async fn test_regrade_overwrites_previous_final_grade() {
        let fx = submitted_fixture().await;
        let service = AssessmentService::new(fx.storage.clone(), Arc::new(FailingOracle));
        let actor = actor_of(&fx.leader);

        service
            .record_final_grade(&actor, fx.submission_id, grade(55.0))
            .await
            .unwrap();
        let regraded = service
            .record_final_grade(&actor, fx.submission_id, grade(75.0))
            .await
            .unwrap();
        assert_eq!(regraded.score, 75.0);
        assert_eq!(regraded.status, GradeStatus::Pass);

        // 仍然只有一条最终评分
        let stored = fx
            .storage
            .get_final_grade(fx.submission_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.score, 75.0);
    }

    #[tokio::test]
    async fn test_draft_cannot_be_assessed_or_graded() {
        let storage = memory_storage().await;
        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let course = seed_active_course(&storage, &leader).await;
        storage.enroll_student(course.id, student.id).await.unwrap();
        let question = storage
            .create_question(
                leader.id,
                CreateQuestionRequest {
                    course_id: Some(course.id),
                    content: "题".to_string(),
                    question_type: QuestionType::ShortText,
                    rubric: None,
                    options: None,
                },
            )
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(
                leader.id,
                CreateAssignmentRequest {
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
        answers.insert(question.id, "草稿作答".to_string());
        let draft = storage
            .merge_draft_answers(assignment.id, student.id, answers)
            .await
            .unwrap();

        let service = AssessmentService::new(storage.clone(), Arc::new(FixedOracle::scoring(50.0)));
        let actor = actor_of(&leader);

        let err = service
            .trigger_assessment(&actor, draft.id)
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));

        let err = service
            .record_final_grade(&actor, draft.id, grade(50.0))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let fx = submitted_fixture().await;
        let service = AssessmentService::new(fx.storage.clone(), Arc::new(FailingOracle));

        let err = service
            .record_final_grade(&actor_of(&fx.leader), fx.submission_id, grade(101.0))
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_outcome_reports_authoritative_flag() {
        let fx = submitted_fixture().await;
        let service =
            AssessmentService::new(fx.storage.clone(), Arc::new(FixedOracle::scoring(70.0)));
        let leader_actor = actor_of(&fx.leader);
        let student_actor = actor_of(&fx.student);

        service
            .trigger_assessment(&leader_actor, fx.submission_id)
            .await
            .unwrap();

        // 只有 AI 评估时不具权威性
        let outcome = service
            .get_outcome(&student_actor, fx.submission_id)
            .await
            .unwrap();
        assert!(!outcome.authoritative);
        assert!(outcome.ai_assessment.is_some());
        assert!(outcome.final_grade.is_none());

        service
            .record_final_grade(&leader_actor, fx.submission_id, grade(82.0))
            .await
            .unwrap();

        // 最终评分落地后成为权威结论，AI 评估仍然保留
        let outcome = service
            .get_outcome(&student_actor, fx.submission_id)
            .await
            .unwrap();
        assert!(outcome.authoritative);
        assert_eq!(outcome.final_grade.unwrap().score, 82.0);
        assert!(outcome.ai_assessment.is_some());
    }
}
