use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::Serialize;
use tracing::{error, trace};

use crate::runtime::AppContext;

const STORAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct StorageHealth {
    pub status: &'static str,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsHealth {
    pub enabled: bool,
    pub pending_events: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime_secs: i64,
    pub storage: StorageHealth,
    pub analytics: AnalyticsHealth,
    pub response_time_ms: u64,
}

/// Health Service
///
/// 直接 ping 存储而不经过 LinkService，探针需要快速返回。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(ctx: web::Data<AppContext>) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend = ctx.storage.backend_name().to_string();
        let storage = match tokio::time::timeout(STORAGE_CHECK_TIMEOUT, ctx.storage.ping()).await
        {
            Ok(Ok(())) => StorageHealth {
                status: "healthy",
                backend,
                error: None,
            },
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                StorageHealth {
                    status: "unhealthy",
                    backend,
                    error: Some("database error".to_string()),
                }
            }
            Err(_) => {
                error!("Storage health check timeout");
                StorageHealth {
                    status: "unhealthy",
                    backend,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let is_healthy = storage.status == "healthy";
        let now = Utc::now();
        let recorder = ctx.analytics_service.recorder();

        let body = HealthResponse {
            status: if is_healthy { "healthy" } else { "unhealthy" },
            timestamp: now.to_rfc3339(),
            uptime_secs: (now - ctx.started_at).num_seconds().max(0),
            storage,
            analytics: AnalyticsHealth {
                enabled: recorder.is_enabled(),
                pending_events: recorder.pending(),
            },
            response_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(status)
            .content_type("application/json; charset=utf-8")
            .json(body)
    }
}
