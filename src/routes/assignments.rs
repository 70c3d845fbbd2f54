use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::assignments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::assignments::AssignmentService;

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    body: web::Json<CreateAssignmentRequest>,
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

    match service.create_assignment(&actor, body.into_inner()).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业已创建")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取作业详情
pub async fn get_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
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

    match service.get_assignment(&actor, path.into_inner()).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "获取作业成功")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 作业列表
pub async fn list_assignments(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    query: web::Query<AssignmentListQuery>,
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

    match service.list_assignments(&actor, query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取作业列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
    body: web::Json<UpdateAssignmentRequest>,
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
        .update_assignment(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业已更新")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    service: web::Data<AssignmentService>,
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

    match service.delete_assignment(&actor, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已删除"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_assignment))
            .route("", web::get().to(list_assignments))
            .route("/{id}", web::get().to(get_assignment))
            .route("/{id}", web::put().to(update_assignment))
            .route("/{id}", web::delete().to(delete_assignment)),
    );
}
