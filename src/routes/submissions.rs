use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::submissions::requests::{SubmissionListQuery, UpsertDraftRequest};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::submissions::SubmissionService;

// 保存/合并草稿
pub async fn upsert_draft(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    path: web::Path<i64>, // assignment_id
    body: web::Json<UpsertDraftRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Some(a) => a,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    match service
        .upsert_draft(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(submission) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "草稿已保存")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 定稿提交
pub async fn submit(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    path: web::Path<i64>, // assignment_id
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Some(a) => a,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    match service.submit(&actor, path.into_inner()).await {
        Ok(submission) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取提交详情（含评估与最终成绩）
pub async fn get_submission(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Some(a) => a,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    match service.get_detail(&actor, path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "获取提交成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 提交列表（学生只看到自己的）
pub async fn list_submissions(
    req: HttpRequest,
    service: web::Data<SubmissionService>,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Some(a) => a,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    match service.list_submissions(&actor, query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取提交列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_submissions))
            .route("/{id}", web::get().to(get_submission)),
    );

    // 作业维度的提交路由：草稿与定稿都以 (assignment, student) 定位
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/submission")
            .wrap(middlewares::RequireJWT)
            .route("/draft", web::put().to(upsert_draft))
            .route("/submit", web::post().to(submit)),
    );
}
