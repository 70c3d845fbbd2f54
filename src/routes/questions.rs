use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::questions::requests::{
    CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest,
};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::questions::QuestionService;

// 创建题目
pub async fn create_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    body: web::Json<CreateQuestionRequest>,
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

    match service.create_question(&actor, body.into_inner()).await {
        Ok(question) => Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目已创建"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取题目详情
pub async fn get_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
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

    match service.get_question(&actor, path.into_inner()).await {
        Ok(question) => Ok(HttpResponse::Ok().json(ApiResponse::success(question, "获取题目成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 题目列表
pub async fn list_questions(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    query: web::Query<QuestionListQuery>,
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

    match service.list_questions(&actor, query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取题目列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 更新题目
pub async fn update_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
    path: web::Path<i64>,
    body: web::Json<UpdateQuestionRequest>,
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
        .update_question(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(question) => Ok(HttpResponse::Ok().json(ApiResponse::success(question, "题目已更新"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 删除题目
pub async fn delete_question(
    req: HttpRequest,
    service: web::Data<QuestionService>,
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

    match service.delete_question(&actor, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目已删除"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_question))
            .route("", web::get().to(list_questions))
            .route("/{id}", web::get().to(get_question))
            .route("/{id}", web::put().to(update_question))
            .route("/{id}", web::delete().to(delete_question)),
    );
}
