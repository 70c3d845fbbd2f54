use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::courses::requests::{
    ChangeCourseStatusRequest, CourseListQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::courses::CourseService;

// 创建课程
pub async fn create_course(
    req: HttpRequest,
    service: web::Data<CourseService>,
    body: web::Json<CreateCourseRequest>,
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

    match service.create_course(&actor, body.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程已创建"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取课程详情
pub async fn get_course(
    req: HttpRequest,
    service: web::Data<CourseService>,
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

    match service.get_course(&actor, path.into_inner()).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "获取课程成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 课程列表
pub async fn list_courses(
    req: HttpRequest,
    service: web::Data<CourseService>,
    query: web::Query<CourseListQuery>,
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

    match service.list_courses(&actor, query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取课程列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 更新课程
pub async fn update_course(
    req: HttpRequest,
    service: web::Data<CourseService>,
    path: web::Path<i64>,
    body: web::Json<UpdateCourseRequest>,
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
        .update_course(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程已更新"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 变更课程状态
pub async fn change_course_status(
    req: HttpRequest,
    service: web::Data<CourseService>,
    path: web::Path<i64>,
    body: web::Json<ChangeCourseStatusRequest>,
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
        .change_status(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程状态已变更"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 删除课程
pub async fn delete_course(
    req: HttpRequest,
    service: web::Data<CourseService>,
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

    match service.delete_course(&actor, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课程已删除"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_course))
            .route("", web::get().to(list_courses))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", web::put().to(update_course))
            .route("/{id}/status", web::post().to(change_course_status))
            .route("/{id}", web::delete().to(delete_course)),
    );
}
