//! HTTP surface: routes, middleware and response helpers

pub mod error_code;
pub mod helpers;
pub mod jwt;
pub mod middleware;
pub mod services;
pub mod types;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{error, web};

use self::error_code::ErrorCode;
use self::helpers::error_response;
use self::middleware::BearerAuth;
use self::services::{
    HealthService, LoginService, RedirectService, analytics_routes, link_routes,
};
use crate::runtime::AppContext;

const JSON_BODY_LIMIT: usize = 64 * 1024;

/// JSON 请求体解析失败时返回统一的 400 错误体
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let resp = error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::BadRequest,
                format!("Invalid request body: {}", err),
            );
            error::InternalError::from_response(err, resp).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let resp = error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            format!("Invalid query string: {}", err),
        );
        error::InternalError::from_response(err, resp).into()
    })
}

/// 注册全部路由与共享状态
///
/// `/{short_url}` 通配路由最后注册，`/health` 与 `/api/*` 优先匹配。
pub fn configure_app(ctx: Arc<AppContext>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let auth = Arc::clone(&ctx.auth_service);

        cfg.app_data(web::Data::from(ctx))
            .app_data(json_config())
            .app_data(query_config())
            .route("/", web::get().to(RedirectService::index))
            .route("/health", web::get().to(HealthService::health_check))
            .service(
                web::scope("/api")
                    .wrap(BearerAuth::new(auth))
                    .route("/login", web::post().to(LoginService::login))
                    .configure(link_routes)
                    .configure(analytics_routes),
            )
            .route(
                "/{short_url}",
                web::get().to(RedirectService::handle_redirect),
            );
    }
}
