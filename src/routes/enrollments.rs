use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT};
use crate::models::enrollments::requests::{
    AssignInstructorRequest, EnrollStudentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::enrollments::EnrollmentService;

// 学生选课
pub async fn enroll_student(
    req: HttpRequest,
    service: web::Data<EnrollmentService>,
    path: web::Path<i64>, // course_id
    body: web::Json<EnrollStudentRequest>,
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
        .enroll_student(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(enrollment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "选课已登记")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 变更选课记录（状态 / 进度）
pub async fn update_enrollment(
    req: HttpRequest,
    service: web::Data<EnrollmentService>,
    path: web::Path<(i64, i64)>, // (course_id, student_id)
    body: web::Json<UpdateEnrollmentRequest>,
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

    let (course_id, student_id) = path.into_inner();
    match service
        .update_enrollment(&actor, course_id, student_id, body.into_inner())
        .await
    {
        Ok(enrollment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "选课记录已更新")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 指派授课教师
pub async fn assign_instructor(
    req: HttpRequest,
    service: web::Data<EnrollmentService>,
    path: web::Path<i64>, // course_id
    body: web::Json<AssignInstructorRequest>,
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
        .assign_instructor(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "授课教师已指派")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 课程成员列表
pub async fn list_enrollments(
    req: HttpRequest,
    service: web::Data<EnrollmentService>,
    path: web::Path<i64>, // course_id
    query: web::Query<EnrollmentListQuery>,
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
        .list_enrollments(&actor, path.into_inner(), query.into_inner())
        .await
    {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取成员列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/enrollments")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(enroll_student))
            .route("", web::get().to(list_enrollments))
            .route("/{student_id}", web::put().to(update_enrollment)),
    );

    cfg.service(
        web::scope("/api/v1/courses/{course_id}/instructors")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(assign_instructor)),
    );
}
