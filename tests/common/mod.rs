//! Shared setup for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use linkpulse::config::{AppConfig, MAX_ANALYTICS_BATCH_SIZE};
use linkpulse::runtime::AppContext;
use linkpulse::storage::{SeaOrmStorage, StorageFactory};
use tempfile::TempDir;

pub const TEST_EMAIL: &str = "admin@example.com";
pub const TEST_PASSWORD: &str = "correct horse";

/// 指向临时 SQLite 文件的配置，分析事件只在手动 flush 时写入
pub fn test_config(dir: &TempDir) -> AppConfig {
    let db_path = dir.path().join("linkpulse_test.db");
    let mut config = AppConfig::default();
    config.database.database_url = format!("sqlite://{}?mode=rwc", db_path.display());
    config.analytics.flush_interval_secs = 3600;
    config.analytics.max_batch_size = MAX_ANALYTICS_BATCH_SIZE;
    config.auth.email = TEST_EMAIL.to_string();
    config.auth.password = TEST_PASSWORD.to_string();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

pub async fn create_storage(config: &AppConfig) -> Arc<SeaOrmStorage> {
    StorageFactory::create(&config.database)
        .await
        .expect("Failed to create storage")
}

pub async fn create_context_with(
    customize: impl FnOnce(&mut AppConfig),
) -> (Arc<AppContext>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = test_config(&temp_dir);
    customize(&mut config);
    let storage = create_storage(&config).await;
    (Arc::new(AppContext::new(config, storage)), temp_dir)
}

pub async fn create_context() -> (Arc<AppContext>, TempDir) {
    create_context_with(|_| {}).await
}
