use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// 应用配置（从 TOML + 环境变量加载，启动后只读）
///
/// 启动时构建一次，随 `AppContext` 传递给各组件，不存在全局可变状态。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// 生成短链接时使用的前缀，例如 `https://lp.example.com`。
    /// 未设置时使用请求的 scheme + host。
    #[serde(default)]
    pub public_base_url: Option<String>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// 是否信任 X-Forwarded-For / Forwarded 头（部署在反向代理之后时开启）
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// 连接超时（秒）
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` 或 `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 登录凭据与 JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub email: String,
    /// Argon2 PHC 字符串（推荐，`linkpulse hash-password` 生成）或明文
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// 为空时启动生成随机密钥，重启后旧 token 失效
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: u64,
    /// 为 true 时 /api 下除登录外的接口都需要 Bearer token
    #[serde(default)]
    pub require_token: bool,
}

/// 点击计数来源
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ClickSource {
    /// 只有重定向计数
    #[default]
    Redirect,
    /// 只有 POST /api/click 计数
    Explicit,
    /// 两条路径都计数（同一次访问会被计两次）
    Both,
}

impl ClickSource {
    pub fn counts_redirect(self) -> bool {
        matches!(self, ClickSource::Redirect | ClickSource::Both)
    }

    pub fn counts_explicit(self) -> bool {
        matches!(self, ClickSource::Explicit | ClickSource::Both)
    }
}

/// 短链接生成与解析配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_code_length")]
    pub code_length: usize,
    #[serde(default = "default_max_generate_attempts")]
    pub max_generate_attempts: u32,
    /// 过期链接在解析时返回 410
    #[serde(default = "default_enforce_expiration")]
    pub enforce_expiration: bool,
    #[serde(default)]
    pub click_source: ClickSource,
}

/// 点击事件记录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_analytics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    #[serde(default = "default_record_ip")]
    pub record_ip: bool,
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
    /// `["*"]` 表示允许任意来源
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: usize,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "linkpulse.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_user_id() -> String {
    "user123".to_string()
}

fn default_token_ttl_minutes() -> u64 {
    60
}

fn default_code_length() -> usize {
    6
}

fn default_max_generate_attempts() -> u32 {
    5
}

fn default_enforce_expiration() -> bool {
    true
}

fn default_analytics_enabled() -> bool {
    true
}

fn default_flush_interval_secs() -> u64 {
    5
}

fn default_max_batch_size() -> usize {
    100
}

fn default_record_ip() -> bool {
    true
}

fn default_cors_enabled() -> bool {
    true
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_max_age() -> usize {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            public_base_url: None,
            workers: default_workers(),
            trust_forwarded_for: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            user_id: default_user_id(),
            jwt_secret: String::new(),
            token_ttl_minutes: default_token_ttl_minutes(),
            require_token: false,
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            max_generate_attempts: default_max_generate_attempts(),
            enforce_expiration: default_enforce_expiration(),
            click_source: ClickSource::default(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_analytics_enabled(),
            flush_interval_secs: default_flush_interval_secs(),
            max_batch_size: default_max_batch_size(),
            record_ip: default_record_ip(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
            allowed_origins: default_allowed_origins(),
            max_age: default_cors_max_age(),
        }
    }
}
