//! Server mode
//!
//! 构建上下文、配置中间件并启动 HTTP 服务，收到关闭信号后刷盘退出。

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::configure_app;
use crate::api::middleware::RequestIdMiddleware;
use crate::config::{AppConfig, CorsConfig};
use crate::runtime::lifetime::{shutdown, startup};

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors: &CorsConfig) {
    if cors.enabled && cors.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 关闭时使用浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .max_age(cors_config.max_age);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: AppConfig) -> Result<()> {
    let startup = startup::prepare_server_startup(config).await.map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let app_ctx = startup.app.clone();
    let server_config = app_ctx.config.server.clone();
    let cors_config = app_ctx.config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = server_config.workers.clamp(1, 32);
    warn!("Using {} workers for the server", workers);

    let ctx_for_app = app_ctx.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors_middleware(&cors_config))
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .configure(configure_app(ctx_for_app.clone()))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(workers);

    let bind_address = format!("{}:{}", server_config.host, server_config.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .disable_signals()
        .run();
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("HTTP server error")?;
        }
        _ = shutdown::wait_for_signal() => {
            info!("Shutdown signal received, stopping HTTP server...");
            handle.stop(true).await;
        }
    }

    // 服务器停止后再刷盘，避免遗漏最后一批请求产生的事件
    shutdown::perform_shutdown_tasks(&app_ctx).await;

    if let Some(task) = startup.flush_task {
        task.abort();
    }

    Ok(())
}
