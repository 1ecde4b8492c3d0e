use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::analytics::{AnalyticsRecorder, ClickEventSink};
use crate::config::AppConfig;
use crate::services::{AnalyticsService, AuthService, LinkService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 进程内共享状态，启动时构建一次，通过 `web::Data` 交给各 handler
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub storage: Arc<SeaOrmStorage>,
    pub link_service: Arc<LinkService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub auth_service: Arc<AuthService>,
    pub started_at: DateTime<Utc>,
}

impl AppContext {
    /// 用已连接的存储组装各服务（不启动后台任务）
    pub fn new(config: AppConfig, storage: Arc<SeaOrmStorage>) -> Self {
        let recorder = AnalyticsRecorder::from_config(
            Arc::clone(&storage) as Arc<dyn ClickEventSink>,
            &config.analytics,
        );

        let link_service = Arc::new(LinkService::new(
            Arc::clone(&storage),
            config.links.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(Arc::clone(&storage), recorder));
        let auth_service = Arc::new(AuthService::new(config.auth.clone()));

        Self {
            config: Arc::new(config),
            storage,
            link_service,
            analytics_service,
            auth_service,
            started_at: Utc::now(),
        }
    }
}

pub struct StartupContext {
    pub app: Arc<AppContext>,
    /// 点击事件定时刷盘任务
    pub flush_task: Option<JoinHandle<()>>,
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、组装服务、启动后台任务
pub async fn prepare_server_startup(config: AppConfig) -> Result<StartupContext> {
    let start_time = Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to initialize storage")?;
    info!("Using storage backend: {}", storage.backend_name());

    let app = Arc::new(AppContext::new(config, storage));

    let recorder = app.analytics_service.recorder();
    let flush_task = if recorder.is_enabled() {
        debug!(
            "Click analytics enabled (flush every {}s, batch {})",
            app.config.analytics.flush_interval_secs, app.config.analytics.max_batch_size
        );
        Some(recorder.spawn_background_task())
    } else {
        warn!("Click analytics is disabled in configuration");
        None
    };

    info!("Click counting source: {}", app.link_service.click_source());
    if app.auth_service.require_token() {
        info!("Bearer token required for /api routes");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { app, flush_task })
}
