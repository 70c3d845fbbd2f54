use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::middlewares::RateLimit;
use crate::models::system::requests::BootstrapRequest;
use crate::models::{ApiResponse, error_response};
use crate::services::system::SystemService;

// 系统状态，不需要认证
pub async fn get_status(service: web::Data<SystemService>) -> ActixResult<HttpResponse> {
    match service.status().await {
        Ok(status) => Ok(HttpResponse::Ok().json(ApiResponse::success(status, "获取系统状态成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 一次性系统引导：创建首个管理员
pub async fn bootstrap(
    service: web::Data<SystemService>,
    body: web::Json<BootstrapRequest>,
) -> ActixResult<HttpResponse> {
    match service.bootstrap(body.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result, "系统引导完成"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .route("/status", web::get().to(get_status))
            .service(
                web::scope("/bootstrap")
                    .wrap(RateLimit::bootstrap())
                    .route("", web::post().to(bootstrap)),
            ),
    );
}
