use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RequireJWT, RequireRole};
use crate::models::profiles::entities::ProfileRole;
use crate::models::profiles::requests::{
    ApproveProfileRequest, ChangeRoleRequest, ProfileListQuery, UpdateProfileRequest,
};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::profiles::ProfileService;

// 获取自己的档案
pub async fn get_my_profile(
    req: HttpRequest,
    service: web::Data<ProfileService>,
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

    match service.get_profile(&actor, actor.id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "获取档案成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取指定档案
pub async fn get_profile(
    req: HttpRequest,
    service: web::Data<ProfileService>,
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

    match service.get_profile(&actor, path.into_inner()).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "获取档案成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 更新档案
pub async fn update_profile(
    req: HttpRequest,
    service: web::Data<ProfileService>,
    path: web::Path<i64>,
    body: web::Json<UpdateProfileRequest>,
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
        .update_profile(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "档案已更新"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 审批档案（管理员）
pub async fn approve_profile(
    req: HttpRequest,
    service: web::Data<ProfileService>,
    path: web::Path<i64>,
    body: web::Json<ApproveProfileRequest>,
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
        .approve_profile(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "审批已记录"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 变更全局角色（管理员）
pub async fn change_role(
    req: HttpRequest,
    service: web::Data<ProfileService>,
    path: web::Path<i64>,
    body: web::Json<ChangeRoleRequest>,
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
        .change_role(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "角色已变更"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 档案列表（管理员）
pub async fn list_profiles(
    req: HttpRequest,
    service: web::Data<ProfileService>,
    query: web::Query<ProfileListQuery>,
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

    match service.list_profiles(&actor, query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取档案列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profiles")
            .wrap(middlewares::RequireJWT)
            .route("/me", web::get().to(get_my_profile))
            .route("/{id}", web::get().to(get_profile))
            .route("/{id}", web::put().to(update_profile))
            .route("/{id}/approval", web::post().to(approve_profile))
            .route("/{id}/role", web::post().to(change_role)),
    );

    // 管理端列表：角色粗筛在中间件，服务层仍会兜底校验
    cfg.service(
        web::scope("/api/v1/admin/profiles")
            .wrap(RequireRole::new_any(ProfileRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_profiles)),
    );
}
