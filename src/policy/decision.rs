use crate::errors::{Result, VocademyError};

/// 拒绝原因，机器可读
///
/// 传输层据此选择状态码；`NotRelated` 对外必须表现为 404，
/// 避免向无关主体泄露资源是否存在。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    NotApproved,
    RoleForbidden,
    NotEnrolled,
    // 主体与资源所属课程毫无关系：对外隐藏资源存在性
    NotRelated,
    AlreadyUsed,
    // 课程状态变更仅限管理员
    StatusChangeForbidden,
    // 课程仍有选课或作业，只能归档不能删除
    CourseNotEmpty,
    SubmissionLocked,
}

impl DenyReason {
    pub fn as_code(&self) -> &'static str {
        match self {
            DenyReason::NotApproved => "NOT_APPROVED",
            DenyReason::RoleForbidden => "ROLE_FORBIDDEN",
            DenyReason::NotEnrolled => "NOT_ENROLLED",
            DenyReason::NotRelated => "NOT_FOUND",
            DenyReason::AlreadyUsed => "ALREADY_USED",
            DenyReason::StatusChangeForbidden => "STATUS_CHANGE_FORBIDDEN",
            DenyReason::CourseNotEmpty => "COURSE_NOT_EMPTY",
            DenyReason::SubmissionLocked => "SUBMISSION_LOCKED",
        }
    }

    /// 转换为服务层的类型化错误
    pub fn into_error(self, detail: impl Into<String>) -> VocademyError {
        let detail = detail.into();
        match self {
            DenyReason::NotApproved => VocademyError::not_approved(detail),
            DenyReason::RoleForbidden | DenyReason::StatusChangeForbidden => {
                VocademyError::role_forbidden(detail)
            }
            DenyReason::NotEnrolled => VocademyError::not_enrolled(detail),
            DenyReason::NotRelated => VocademyError::not_found(detail),
            DenyReason::AlreadyUsed => VocademyError::already_used(detail),
            DenyReason::CourseNotEmpty => VocademyError::invalid_state(detail),
            DenyReason::SubmissionLocked => VocademyError::submission_locked(detail),
        }
    }
}

/// 授权决策
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Allow 返回 Ok(())，Deny 转换为携带拒绝码的类型化错误
    pub fn require(self, what: &str) -> Result<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                let code = reason.as_code();
                Err(reason.into_error(format!("{code}: {what}")))
            }
        }
    }
}
