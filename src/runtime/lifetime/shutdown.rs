use std::time::Duration;

use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::runtime::AppContext;

/// 关闭时刷盘的超时时间（秒）
const FLUSH_TIMEOUT_SECS: u64 = 10;

/// 等待 Ctrl+C 或 SIGTERM
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// 在超时内刷写缓冲的点击事件
pub async fn perform_shutdown_tasks(ctx: &AppContext) {
    let pending = ctx.analytics_service.recorder().pending();
    match timeout(
        Duration::from_secs(FLUSH_TIMEOUT_SECS),
        ctx.analytics_service.flush(),
    )
    .await
    {
        Ok(()) => info!("Analytics recorder flushed ({} pending events)", pending),
        Err(_) => error!(
            "Analytics flush timed out after {} seconds, {} events may be lost",
            FLUSH_TIMEOUT_SECS, pending
        ),
    }
}
