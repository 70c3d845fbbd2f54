use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RateLimit, RequireJWT};
use crate::models::assessments::requests::RecordFinalGradeRequest;
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::assessments::AssessmentService;

// 手动触发 AI 评分（提交时评分失败后的重触发入口）
pub async fn trigger_assessment(
    req: HttpRequest,
    service: web::Data<AssessmentService>,
    path: web::Path<i64>, // submission_id
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

    match service.trigger_assessment(&actor, path.into_inner()).await {
        Ok(assessment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assessment, "AI 评分已记录")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 录入最终成绩
pub async fn record_final_grade(
    req: HttpRequest,
    service: web::Data<AssessmentService>,
    path: web::Path<i64>, // submission_id
    body: web::Json<RecordFinalGradeRequest>,
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
        .record_final_grade(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "最终成绩已录入"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 查询评估结果（最终成绩优先于 AI 评分）
pub async fn get_outcome(
    req: HttpRequest,
    service: web::Data<AssessmentService>,
    path: web::Path<i64>, // submission_id
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

    match service.get_outcome(&actor, path.into_inner()).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome, "获取评估成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由（更具体的前缀先注册）
pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    // 评分触发单独限流，预言机调用昂贵
    cfg.service(
        web::scope("/api/v1/assessments/{submission_id}/trigger")
            .wrap(RateLimit::assess())
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(trigger_assessment)),
    );

    cfg.service(
        web::scope("/api/v1/assessments/{submission_id}")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_outcome))
            .route("/final-grade", web::put().to(record_final_grade)),
    );
}
