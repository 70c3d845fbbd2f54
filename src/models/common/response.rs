use actix_web::{HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::VocademyError;

// 业务错误码，随 ApiResponse.code 下发
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 40000,
    Unauthorized = 40100,
    NotApproved = 40300,
    Forbidden = 40301,
    NotEnrolled = 40302,
    NotFound = 40400,
    // 变更未命中任何行：对调用者而言与 NotFound 不可区分
    NotFoundOrForbidden = 40401,
    Conflict = 40900,
    SubmissionLocked = 40901,
    IncompleteSubmission = 40902,
    AlreadyAssessed = 40903,
    InvitationAlreadyUsed = 40904,
    ValidationFailed = 42200,
    TooManyRequests = 42900,
    InternalServerError = 50000,
    UpstreamFailure = 50200,
}

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 业务错误到 (HTTP 状态码, 业务错误码) 的统一映射
///
/// 服务层抛出类型化错误，传输层只在这里翻译一次。
pub fn error_status(err: &VocademyError) -> (StatusCode, ErrorCode) {
    match err {
        VocademyError::AuthRequired(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        VocademyError::NotApproved(_) => (StatusCode::FORBIDDEN, ErrorCode::NotApproved),
        VocademyError::RoleForbidden(_) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        VocademyError::NotEnrolled(_) => (StatusCode::FORBIDDEN, ErrorCode::NotEnrolled),
        VocademyError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        // 零行变更：对外表现为 404，绝不作为成功返回
        VocademyError::NoRowsAffected(_) => {
            (StatusCode::NOT_FOUND, ErrorCode::NotFoundOrForbidden)
        }
        VocademyError::InvalidState(_) => (StatusCode::CONFLICT, ErrorCode::Conflict),
        VocademyError::SubmissionLocked(_) => (StatusCode::CONFLICT, ErrorCode::SubmissionLocked),
        VocademyError::IncompleteSubmission(_) => {
            (StatusCode::CONFLICT, ErrorCode::IncompleteSubmission)
        }
        VocademyError::AlreadyAssessed(_) => (StatusCode::CONFLICT, ErrorCode::AlreadyAssessed),
        VocademyError::AlreadyUsed(_) => (StatusCode::CONFLICT, ErrorCode::InvitationAlreadyUsed),
        VocademyError::Validation(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::ValidationFailed)
        }
        VocademyError::UpstreamFailure(_) => (StatusCode::BAD_GATEWAY, ErrorCode::UpstreamFailure),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    }
}

/// 把业务错误渲染为统一的 JSON 错误响应
pub fn error_response(err: &VocademyError) -> HttpResponse {
    let (status, code) = error_status(err);
    // 5xx 不向客户端泄露内部细节
    let message = if status.is_server_error() {
        tracing::error!("Internal error: {}", err);
        err.error_type().to_string()
    } else {
        err.message().to_string()
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let (status, code) = error_status(&VocademyError::submission_locked("locked"));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, ErrorCode::SubmissionLocked);

        let (status, code) = error_status(&VocademyError::no_rows_affected("filtered"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, ErrorCode::NotFoundOrForbidden);

        let (status, _) = error_status(&VocademyError::database_operation("boom"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
