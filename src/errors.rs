use std::fmt;

use actix_web::http::StatusCode;

use crate::api::error_code::ErrorCode;

#[derive(Debug, Clone)]
pub enum LinkPulseError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    InvalidUrl(String),
    NotFound(String),
    LinkExpired(String),
    LinkAlreadyExists(String),
    AuthFailed(String),
    TokenInvalid(String),
    Serialization(String),
}

impl LinkPulseError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkPulseError::Config(_) => "E001",
            LinkPulseError::DatabaseConfig(_) => "E002",
            LinkPulseError::DatabaseConnection(_) => "E003",
            LinkPulseError::DatabaseOperation(_) => "E004",
            LinkPulseError::FileOperation(_) => "E005",
            LinkPulseError::Validation(_) => "E006",
            LinkPulseError::InvalidUrl(_) => "E007",
            LinkPulseError::NotFound(_) => "E008",
            LinkPulseError::LinkExpired(_) => "E009",
            LinkPulseError::LinkAlreadyExists(_) => "E010",
            LinkPulseError::AuthFailed(_) => "E011",
            LinkPulseError::TokenInvalid(_) => "E012",
            LinkPulseError::Serialization(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkPulseError::Config(_) => "Configuration Error",
            LinkPulseError::DatabaseConfig(_) => "Database Configuration Error",
            LinkPulseError::DatabaseConnection(_) => "Database Connection Error",
            LinkPulseError::DatabaseOperation(_) => "Database Operation Error",
            LinkPulseError::FileOperation(_) => "File Operation Error",
            LinkPulseError::Validation(_) => "Validation Error",
            LinkPulseError::InvalidUrl(_) => "Invalid URL",
            LinkPulseError::NotFound(_) => "Resource Not Found",
            LinkPulseError::LinkExpired(_) => "Link Expired",
            LinkPulseError::LinkAlreadyExists(_) => "Link Already Exists",
            LinkPulseError::AuthFailed(_) => "Authentication Failed",
            LinkPulseError::TokenInvalid(_) => "Invalid Token",
            LinkPulseError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkPulseError::Config(msg)
            | LinkPulseError::DatabaseConfig(msg)
            | LinkPulseError::DatabaseConnection(msg)
            | LinkPulseError::DatabaseOperation(msg)
            | LinkPulseError::FileOperation(msg)
            | LinkPulseError::Validation(msg)
            | LinkPulseError::InvalidUrl(msg)
            | LinkPulseError::NotFound(msg)
            | LinkPulseError::LinkExpired(msg)
            | LinkPulseError::LinkAlreadyExists(msg)
            | LinkPulseError::AuthFailed(msg)
            | LinkPulseError::TokenInvalid(msg)
            | LinkPulseError::Serialization(msg) => msg,
        }
    }

    /// 是否属于服务端内部错误（详情只写日志，不返回给客户端）
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            LinkPulseError::Config(_)
                | LinkPulseError::DatabaseConfig(_)
                | LinkPulseError::DatabaseConnection(_)
                | LinkPulseError::DatabaseOperation(_)
                | LinkPulseError::FileOperation(_)
                | LinkPulseError::Serialization(_)
        )
    }

    /// 对应的 API 错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            LinkPulseError::Validation(_) => ErrorCode::BadRequest,
            LinkPulseError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            LinkPulseError::NotFound(_) => ErrorCode::LinkNotFound,
            LinkPulseError::LinkExpired(_) => ErrorCode::LinkExpired,
            LinkPulseError::LinkAlreadyExists(_) => ErrorCode::LinkAlreadyExists,
            LinkPulseError::AuthFailed(_) => ErrorCode::AuthFailed,
            LinkPulseError::TokenInvalid(_) => ErrorCode::TokenInvalid,
            _ => ErrorCode::InternalServerError,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkPulseError::Validation(_) | LinkPulseError::InvalidUrl(_) => {
                StatusCode::BAD_REQUEST
            }
            LinkPulseError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkPulseError::LinkExpired(_) => StatusCode::GONE,
            LinkPulseError::LinkAlreadyExists(_) => StatusCode::CONFLICT,
            LinkPulseError::AuthFailed(_) | LinkPulseError::TokenInvalid(_) => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给客户端的消息
    ///
    /// 内部错误统一为固定文案，原始错误由调用方记录日志。
    pub fn public_message(&self) -> &str {
        if self.is_internal() {
            "Internal server error"
        } else {
            self.message()
        }
    }

    /// 格式化为彩色输出（用于启动失败等致命错误）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkPulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkPulseError {}

// 便捷的构造函数
impl LinkPulseError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::Validation(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::InvalidUrl(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::NotFound(msg.into())
    }

    pub fn link_expired<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::LinkExpired(msg.into())
    }

    pub fn link_already_exists<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::LinkAlreadyExists(msg.into())
    }

    pub fn auth_failed<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::AuthFailed(msg.into())
    }

    pub fn token_invalid<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::TokenInvalid(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkPulseError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for LinkPulseError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkPulseError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkPulseError {
    fn from(err: std::io::Error) -> Self {
        LinkPulseError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkPulseError {
    fn from(err: serde_json::Error) -> Self {
        LinkPulseError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for LinkPulseError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        LinkPulseError::TokenInvalid(err.to_string())
    }
}

impl From<config::ConfigError> for LinkPulseError {
    fn from(err: config::ConfigError) -> Self {
        LinkPulseError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkPulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            LinkPulseError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LinkPulseError::link_expired("x").http_status(),
            StatusCode::GONE
        );
        assert_eq!(
            LinkPulseError::link_already_exists("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LinkPulseError::auth_failed("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            LinkPulseError::invalid_url("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LinkPulseError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = LinkPulseError::database_operation("UNIQUE constraint failed: links.short_url");
        assert!(err.is_internal());
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(err.error_code(), ErrorCode::InternalServerError);
    }

    #[test]
    fn test_client_errors_keep_message() {
        let err = LinkPulseError::not_found("Short URL not found");
        assert!(!err.is_internal());
        assert_eq!(err.public_message(), "Short URL not found");
        assert_eq!(err.error_code(), ErrorCode::LinkNotFound);
    }

    #[test]
    fn test_from_db_err() {
        let err: LinkPulseError = sea_orm::DbErr::Custom("boom".into()).into();
        assert!(matches!(err, LinkPulseError::DatabaseOperation(_)));
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = LinkPulseError::validation("alias too long");
        assert_eq!(err.to_string(), "Validation Error: alias too long");
    }
}
