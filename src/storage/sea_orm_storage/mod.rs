//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assessments;
mod assignments;
mod courses;
mod enrollments;
mod invitations;
mod profiles;
mod questions;
mod submissions;
mod system_settings;

use crate::config::AppConfig;
use crate::errors::{Result, VocademyError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(&config.database.url, config.database.pool_size).await
    }

    /// 指定连接 URL 创建实例（测试使用 sqlite::memory: 时传入 pool_size = 1）
    pub async fn new_with_url(url: &str, pool_size: u32) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size).await?
        } else {
            Self::connect_generic(&db_url, pool_size).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| VocademyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| VocademyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| VocademyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32) -> Result<DatabaseConnection> {
        let config = AppConfig::get();
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| VocademyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(VocademyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 档案模块
    async fn create_profile(&self, req: CreateProfileRequest) -> Result<Profile> {
        self.create_profile_impl(req).await
    }

    async fn get_profile_by_id(&self, id: i64) -> Result<Option<Profile>> {
        self.get_profile_by_id_impl(id).await
    }

    async fn get_profile_by_email(&self, email: &str) -> Result<Option<Profile>> {
        self.get_profile_by_email_impl(email).await
    }

    async fn list_profiles_with_pagination(
        &self,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse> {
        self.list_profiles_with_pagination_impl(query).await
    }

    async fn update_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        self.update_profile_impl(id, update).await
    }

    async fn set_approval_status(&self, id: i64, status: ApprovalStatus) -> Result<bool> {
        self.set_approval_status_impl(id, status).await
    }

    async fn set_profile_role(&self, id: i64, role: ProfileRole) -> Result<bool> {
        self.set_profile_role_impl(id, role).await
    }

    // 课程模块
    async fn create_course(&self, creator_id: i64, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(creator_id, req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn set_course_status(&self, id: i64, status: CourseStatus) -> Result<bool> {
        self.set_course_status_impl(id, status).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn count_active_enrollments(&self, course_id: i64) -> Result<u64> {
        self.count_active_enrollments_impl(course_id).await
    }

    async fn count_course_assignments(&self, course_id: i64) -> Result<u64> {
        self.count_course_assignments_impl(course_id).await
    }

    async fn count_active_instructors(&self, course_id: i64) -> Result<u64> {
        self.count_active_instructors_impl(course_id).await
    }

    // 选课与授课模块
    async fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(course_id, student_id).await
    }

    async fn get_enrollment(&self, course_id: i64, student_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(course_id, student_id).await
    }

    async fn update_enrollment(
        &self,
        course_id: i64,
        student_id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_impl(course_id, student_id, update)
            .await
    }

    async fn list_enrollments_with_pagination(
        &self,
        course_id: i64,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        self.list_enrollments_with_pagination_impl(course_id, query)
            .await
    }

    async fn assign_instructor(
        &self,
        course_id: i64,
        instructor_id: i64,
        role: InstructorRole,
    ) -> Result<InstructorAssignment> {
        self.assign_instructor_impl(course_id, instructor_id, role)
            .await
    }

    async fn get_instructor_assignment(
        &self,
        course_id: i64,
        instructor_id: i64,
    ) -> Result<Option<InstructorAssignment>> {
        self.get_instructor_assignment_impl(course_id, instructor_id)
            .await
    }

    async fn list_instructors(&self, course_id: i64) -> Result<Vec<InstructorAssignment>> {
        self.list_instructors_impl(course_id).await
    }

    // 题库模块
    async fn create_question(
        &self,
        creator_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        self.create_question_impl(creator_id, req).await
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(id).await
    }

    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        self.list_questions_with_pagination_impl(query).await
    }

    async fn update_question(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        self.update_question_impl(id, update).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    async fn question_has_answers(&self, question_id: i64) -> Result<bool> {
        self.question_has_answers_impl(question_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        creator_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(creator_id, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(id, update).await
    }

    async fn delete_assignment(&self, id: i64) -> Result<bool> {
        self.delete_assignment_impl(id).await
    }

    // 提交模块
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_impl(assignment_id, student_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        student_id: Option<i64>,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(student_id, query)
            .await
    }

    async fn merge_draft_answers(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: BTreeMap<i64, String>,
    ) -> Result<Submission> {
        self.merge_draft_answers_impl(assignment_id, student_id, answers)
            .await
    }

    async fn mark_submitted(&self, assignment_id: i64, student_id: i64) -> Result<bool> {
        self.mark_submitted_impl(assignment_id, student_id).await
    }

    async fn mark_graded(&self, submission_id: i64) -> Result<bool> {
        self.mark_graded_impl(submission_id).await
    }

    // 评估模块
    async fn get_ai_assessment(&self, submission_id: i64) -> Result<Option<AiAssessment>> {
        self.get_ai_assessment_impl(submission_id).await
    }

    async fn insert_ai_assessment(
        &self,
        submission_id: i64,
        req: RecordAiAssessmentRequest,
        request_id: Option<String>,
    ) -> Result<AiAssessment> {
        self.insert_ai_assessment_impl(submission_id, req, request_id)
            .await
    }

    async fn get_final_grade(&self, submission_id: i64) -> Result<Option<FinalGrade>> {
        self.get_final_grade_impl(submission_id).await
    }

    async fn upsert_final_grade(
        &self,
        submission_id: i64,
        grader_id: i64,
        req: RecordFinalGradeRequest,
    ) -> Result<FinalGrade> {
        self.upsert_final_grade_impl(submission_id, grader_id, req)
            .await
    }

    // 邀请模块
    async fn create_invitation(
        &self,
        invited_by: i64,
        token: &str,
        req: CreateInvitationRequest,
    ) -> Result<Invitation> {
        self.create_invitation_impl(invited_by, token, req).await
    }

    async fn get_invitation_by_id(&self, id: i64) -> Result<Option<Invitation>> {
        self.get_invitation_by_id_impl(id).await
    }

    async fn get_invitation_by_token(&self, token: &str) -> Result<Option<Invitation>> {
        self.get_invitation_by_token_impl(token).await
    }

    async fn list_invitations_with_pagination(
        &self,
        invited_by: Option<i64>,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse> {
        self.list_invitations_with_pagination_impl(invited_by, query)
            .await
    }

    async fn delete_invitation(&self, id: i64) -> Result<bool> {
        self.delete_invitation_impl(id).await
    }

    async fn mark_invitation_used(&self, id: i64, used_by: i64) -> Result<bool> {
        self.mark_invitation_used_impl(id, used_by).await
    }

    // 系统设置模块
    async fn get_setting(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_impl(key).await
    }

    async fn set_setting_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        self.set_setting_if_absent_impl(key, value).await
    }
}
