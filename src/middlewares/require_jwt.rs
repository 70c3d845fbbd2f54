/*!
 * JWT 认证中间件
 *
 * 验证访问令牌并把对应的档案放进请求扩展。中间件只做"你是谁"：
 * pending 状态的档案也能通过认证，能做什么由服务层的策略引擎裁决。
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中携带 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 校验令牌签名与有效期
 * 3. 按令牌查缓存取档案，未命中则回源数据库并写回缓存
 * 4. 令牌无效或档案不存在时返回 401
 *
 * ## 处理程序中提取主体
 *
 * ```rust,ignore
 * async fn handler(req: HttpRequest) -> Result<HttpResponse> {
 *     if let Some(actor) = RequireJWT::extract_actor(&req) {
 *         // actor.id / actor.role / actor.approval_status
 *     }
 *     ...
 * }
 * ```
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::profiles::entities::{Profile, ProfileRole};
use crate::policy::Actor;
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：提取并验证 JWT access token，返回已认证的档案
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Profile, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    // 按令牌查已认证档案的缓存
    match cache.get_raw(&format!("profile:{token}")).await {
        CacheResult::Found(json) => match serde_json::from_str::<Profile>(&json) {
            Ok(profile) => return Ok(profile),
            Err(_) => {
                cache.remove(&format!("profile:{token}")).await;
                info!("Failed to deserialize profile from cache, falling back to storage");
            }
        },
        _ => {
            debug!("Profile not found in cache, falling back to storage");
        }
    };

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let profile_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid profile ID in JWT".to_string())?;

    let profile = storage
        .get_profile_by_id(profile_id)
        .await
        .map_err(|_| "Failed to retrieve profile from storage".to_string())?
        .ok_or_else(|| "Profile not found".to_string())?;

    // 审批状态不在这里拦截：待审批主体仍可读取自己的档案，
    // 其余操作由策略引擎统一拒绝
    let app_config = AppConfig::get();
    if let Ok(profile_json) = serde_json::to_string(&profile) {
        cache
            .insert_raw(
                format!("profile:{token}"),
                profile_json,
                app_config.cache.default_ttl,
            )
            .await;
    }

    Ok(profile)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(profile) => {
                    debug!("JWT authentication successful for ID: {}", profile.id);
                    req.extensions_mut().insert(profile);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求扩展中提取已认证主体
impl RequireJWT {
    /// 提取完整档案，须在应用了 RequireJWT 的路由中调用
    pub fn extract_profile(req: &actix_web::HttpRequest) -> Option<Profile> {
        req.extensions().get::<Profile>().cloned()
    }

    /// 提取档案 ID
    pub fn extract_profile_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Profile>().map(|profile| profile.id)
    }

    /// 提取全局角色
    pub fn extract_profile_role(req: &actix_web::HttpRequest) -> Option<ProfileRole> {
        req.extensions()
            .get::<Profile>()
            .map(|profile| profile.role.clone())
    }

    /// 提取策略引擎所需的主体事实
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Profile>().map(Actor::from)
    }
}
