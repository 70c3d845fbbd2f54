use actix_web::{HttpRequest, error::Error as ActixError, error::InternalError};

use crate::models::common::response::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时的统一响应
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> ActixError {
    let message = format!("请求体解析失败: {err}");
    let response = actix_web::HttpResponse::UnprocessableEntity()
        .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, message));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时的统一响应
pub fn query_error_handler(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> ActixError {
    let message = format!("查询参数解析失败: {err}");
    let response = actix_web::HttpResponse::UnprocessableEntity()
        .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, message));
    InternalError::from_response(err, response).into()
}
