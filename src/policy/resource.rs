use crate::models::courses::entities::CourseStatus;
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::models::profiles::entities::ProfileRole;
use crate::models::submissions::entities::SubmissionStatus;

/// 操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// 主体与某门课程的关系，由调用方查好后传入
#[derive(Debug, Clone, Default)]
pub struct CourseRelation {
    pub is_instructor: bool,
    pub enrollment: Option<EnrollmentStatus>,
}

impl CourseRelation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn instructor() -> Self {
        Self {
            is_instructor: true,
            enrollment: None,
        }
    }

    pub fn enrolled(status: EnrollmentStatus) -> Self {
        Self {
            is_instructor: false,
            enrollment: Some(status),
        }
    }

    pub fn is_enrolled_active(&self) -> bool {
        self.enrollment == Some(EnrollmentStatus::Active)
    }
}

/// 课程上下文：课程自身状态 + 主体与它的关系
///
/// 课程下挂的资源（题目、作业、提交）都带着这个上下文做决策。
#[derive(Debug, Clone)]
pub struct CourseScope {
    pub status: CourseStatus,
    pub relation: CourseRelation,
}

impl CourseScope {
    pub fn new(status: CourseStatus, relation: CourseRelation) -> Self {
        Self { status, relation }
    }
}

/// 资源描述符
///
/// 只携带决策所需的关系事实，不携带实体本身。
#[derive(Debug, Clone)]
pub enum Resource {
    Profile {
        owner_id: i64,
    },
    Course {
        status: CourseStatus,
        creator_id: i64,
        relation: CourseRelation,
        active_enrollments: u64,
        assignments: u64,
        active_instructors: u64,
        // 本次写操作是否试图变更课程状态
        changes_status: bool,
    },
    // course 为 None 表示全局共享题目
    Question {
        course: Option<CourseScope>,
    },
    Assignment {
        course: CourseScope,
    },
    Submission {
        student_id: i64,
        status: SubmissionStatus,
        course: CourseScope,
        // 写评分字段而非答案内容
        grading: bool,
    },
    Invitation {
        invited_by: i64,
        used: bool,
        invite_role: Option<ProfileRole>,
    },
}
