use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::{self, RateLimit, RequireJWT};
use crate::models::invitations::requests::{
    CreateInvitationRequest, InvitationListQuery, RedeemInvitationRequest,
};
use crate::models::{ApiResponse, ErrorCode, error_response};
use crate::services::invitations::InvitationService;

// 签发邀请
pub async fn create_invitation(
    req: HttpRequest,
    service: web::Data<InvitationService>,
    body: web::Json<CreateInvitationRequest>,
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

    match service.create_invitation(&actor, body.into_inner()).await {
        Ok(invitation) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(invitation, "邀请已签发")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

// 邀请列表（签发者只看到自己的）
pub async fn list_invitations(
    req: HttpRequest,
    service: web::Data<InvitationService>,
    query: web::Query<InvitationListQuery>,
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

    match service.list_invitations(&actor, query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list, "获取邀请列表成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 撤回未使用的邀请
pub async fn delete_invitation(
    req: HttpRequest,
    service: web::Data<InvitationService>,
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

    match service.delete_invitation(&actor, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("邀请已撤回"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 兑换邀请，不需要认证
pub async fn redeem_invitation(
    service: web::Data<InvitationService>,
    body: web::Json<RedeemInvitationRequest>,
) -> ActixResult<HttpResponse> {
    match service.redeem_invitation(body.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "邀请兑换成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_invitation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/invitations")
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(create_invitation))
            .route("", web::get().to(list_invitations))
            .route("/{id}", web::delete().to(delete_invitation)),
    );

    // 公开端点，限流防止令牌暴力枚举
    cfg.service(
        web::scope("/api/v1/redeem")
            .wrap(RateLimit::redeem())
            .route("", web::post().to(redeem_invitation)),
    );
}
