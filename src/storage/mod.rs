use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{
    assessments::{
        entities::{AiAssessment, FinalGrade},
        requests::{RecordAiAssessmentRequest, RecordFinalGradeRequest},
    },
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{
        entities::{Enrollment, InstructorAssignment, InstructorRole},
        requests::{EnrollmentListQuery, UpdateEnrollmentRequest},
        responses::EnrollmentListResponse,
    },
    invitations::{
        entities::Invitation,
        requests::{CreateInvitationRequest, InvitationListQuery},
        responses::InvitationListResponse,
    },
    profiles::{
        entities::{ApprovalStatus, Profile, ProfileRole},
        requests::{CreateProfileRequest, ProfileListQuery, UpdateProfileRequest},
        responses::ProfileListResponse,
    },
    questions::{
        entities::Question,
        requests::{CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
        responses::QuestionListResponse,
    },
    submissions::{
        entities::Submission, requests::SubmissionListQuery, responses::SubmissionListResponse,
    },
    system::entities::SystemSetting,
};

use crate::errors::{Result, VocademyError};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 档案管理方法
    // 创建档案（邀请兑换 / 系统引导路径）
    async fn create_profile(&self, req: CreateProfileRequest) -> Result<Profile>;
    // 通过 ID 获取档案
    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>>;
    // 通过邮箱获取档案
    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>>;
    // 分页列出档案
    async fn list_profiles_with_pagination(
        &self,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse>;
    // 更新档案的非角色字段
    async fn update_profile(&self, id: i64, update: UpdateProfileRequest)
    -> Result<Option<Profile>>;
    // 变更审批状态
    async fn set_approval_status(&self, id: i64, status: ApprovalStatus) -> Result<bool>;
    // 变更全局角色
    async fn set_profile_role(&self, id: i64, role: ProfileRole) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, creator_id: i64, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    // 状态流转（调用方负责权限与业务规则校验）
    async fn set_course_status(&self, id: i64, status: CourseStatus) -> Result<bool>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 课程删除前置条件所需的计数
    async fn count_active_enrollments(&self, course_id: i64) -> Result<u64>;
    async fn count_course_assignments(&self, course_id: i64) -> Result<u64>;
    async fn count_active_instructors(&self, course_id: i64) -> Result<u64>;

    /// 选课与授课关系方法
    // 学生选课，(course_id, student_id) 唯一
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment>;
    async fn get_enrollment(&self, course_id: i64, student_id: i64) -> Result<Option<Enrollment>>;
    // 选课只做状态流转，从不删除
    async fn update_enrollment(
        &self,
        course_id: i64,
        student_id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        course_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    async fn assign_instructor(
        &self,
        course_id: i64,
        instructor_id: i64,
        role: InstructorRole,
    ) -> Result<InstructorAssignment>;
    async fn get_instructor_assignment(
        &self,
        course_id: i64,
        instructor_id: i64,
    ) -> Result<Option<InstructorAssignment>>;
    async fn list_instructors(&self, course_id: i64) -> Result<Vec<InstructorAssignment>>;

    /// 题库管理方法
    async fn create_question(&self, creator_id: i64, req: CreateQuestionRequest)
    -> Result<Question>;
    async fn get_question_by_id(&self, id: i64) -> Result<Option<Question>>;
    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse>;
    async fn update_question(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>>;
    async fn delete_question(&self, id: i64) -> Result<bool>;
    // 是否已有提交作答引用该题目（题型不可变更的判定依据）
    async fn question_has_answers(&self, question_id: i64) -> Result<bool>;

    /// 作业管理方法
    async fn create_assignment(
        &self,
        creator_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 提交生命周期方法
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // student_id 为 Some 时只返回该学生的提交（学生视角自动收窄）
    async fn list_submissions_with_pagination(
        &self,
        student_id: Option<i64>,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 草稿合并保存：按 (assignment_id, student_id) upsert，键级合并而非整体替换。
    // 仅对 draft 状态生效，事务内完成读取与写入。
    async fn merge_draft_answers(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: BTreeMap<i64, String>,
    ) -> Result<Submission>;
    // draft -> submitted，设置 submitted_at；非 draft 行不受影响（返回 false）
    async fn mark_submitted(&self, assignment_id: i64, student_id: i64) -> Result<bool>;
    // submitted -> graded；draft 行不受影响
    async fn mark_graded(&self, submission_id: i64) -> Result<bool>;

    /// 评估聚合方法
    async fn get_ai_assessment(&self, submission_id: i64) -> Result<Option<AiAssessment>>;
    // 一次性写入，submission_id 唯一约束兜底
    async fn insert_ai_assessment(
        &self,
        submission_id: i64,
        req: RecordAiAssessmentRequest,
        request_id: Option<String>,
    ) -> Result<AiAssessment>;
    async fn get_final_grade(&self, submission_id: i64) -> Result<Option<FinalGrade>>;
    // 按 submission_id upsert，后写覆盖先写
    async fn upsert_final_grade(
        &self,
        submission_id: i64,
        grader_id: i64,
        req: RecordFinalGradeRequest,
    ) -> Result<FinalGrade>;

    /// 邀请管理方法
    async fn create_invitation(
        &self,
        invited_by: i64,
        token: &str,
        req: CreateInvitationRequest,
    ) -> Result<Invitation>;
    async fn get_invitation_by_id(&self, id: i64) -> Result<Option<Invitation>>;
    async fn get_invitation_by_token(&self, token: &str) -> Result<Option<Invitation>>;
    // invited_by 为 Some 时只返回该签发者的邀请
    async fn list_invitations_with_pagination(
        &self,
        invited_by: Option<i64>,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse>;
    // 只删除未使用的邀请；已使用的行不受影响（返回 false）
    async fn delete_invitation(&self, id: i64) -> Result<bool>;
    // 原子地标记为已使用；已使用的行不受影响（返回 false，单次兑换保证）
    async fn mark_invitation_used(&self, id: i64, used_by: i64) -> Result<bool>;

    /// 系统设置方法
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>>;
    // 键已存在时不覆盖并返回 false（一次性引导标记的原子保证）
    async fn set_setting_if_absent(&self, key: &str, value: &str) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 零行变更必须显式失败，绝不允许以成功上报
///
/// 行级过滤的后端可能返回"成功但影响零行"，这里把它变成不可表示的状态。
pub fn ensure_affected(affected: bool, what: &str) -> Result<()> {
    if affected {
        Ok(())
    } else {
        Err(VocademyError::no_rows_affected(format!(
            "mutation affected zero rows: {what}"
        )))
    }
}

/// 查不到即 404；未授权路径在此之前就已拒绝
pub fn ensure_found<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| VocademyError::not_found(format!("{what} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_affected() {
        assert!(ensure_affected(true, "update course").is_ok());
        let err = ensure_affected(false, "update course").unwrap_err();
        assert!(err.to_string().contains("zero rows"));
    }

    #[test]
    fn test_ensure_found() {
        assert_eq!(ensure_found(Some(1), "course").unwrap(), 1);
        assert!(ensure_found::<i64>(None, "course").is_err());
    }
}
