use std::path::Path;

use config::{Config, Environment, File};

use super::AppConfig;
use crate::errors::{LinkPulseError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const ENV_PREFIX: &str = "LP";

/// 单条 INSERT 的行数上限，保证绑定参数数量低于 SQLite 的 32766
pub const MAX_ANALYTICS_BATCH_SIZE: usize = 5000;

/// token 有效期上限：一年
pub const MAX_TOKEN_TTL_MINUTES: u64 = 60 * 24 * 365;

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：LP，分隔符：__
    /// 示例：LP__SERVER__PORT=9999
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        if Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }
        Ok(config)
    }

    /// 校验配置中的取值范围
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(LinkPulseError::config("server.port must be non-zero"));
        }
        if !(4..=32).contains(&self.links.code_length) {
            return Err(LinkPulseError::config(format!(
                "links.code_length must be between 4 and 32, got {}",
                self.links.code_length
            )));
        }
        if self.links.max_generate_attempts == 0 {
            return Err(LinkPulseError::config(
                "links.max_generate_attempts must be at least 1",
            ));
        }
        if !(1..=MAX_ANALYTICS_BATCH_SIZE).contains(&self.analytics.max_batch_size) {
            return Err(LinkPulseError::config(format!(
                "analytics.max_batch_size must be between 1 and {}, got {}",
                MAX_ANALYTICS_BATCH_SIZE, self.analytics.max_batch_size
            )));
        }
        if self.analytics.flush_interval_secs == 0 {
            return Err(LinkPulseError::config(
                "analytics.flush_interval_secs must be greater than 0",
            ));
        }
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.auth.token_ttl_minutes) {
            return Err(LinkPulseError::config(format!(
                "auth.token_ttl_minutes must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_MINUTES, self.auth.token_ttl_minutes
            )));
        }
        if let Some(base) = &self.server.public_base_url {
            crate::utils::url_validator::validate_url(base).map_err(|e| {
                LinkPulseError::config(format!("server.public_base_url: {}", e.message()))
            })?;
        }
        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(LinkPulseError::config(format!(
                    "logging.format must be 'text' or 'json', got '{}'",
                    other
                )));
            }
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("# Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LinkPulseError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
