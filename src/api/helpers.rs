//! Response helpers

use actix_web::http::StatusCode;
use actix_web::http::header::USER_AGENT;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{debug, error};

use super::error_code::ErrorCode;
use super::types::ErrorBody;
use crate::analytics::ClickEvent;
use crate::errors::LinkPulseError;
use crate::utils::ip::client_ip;

pub fn json_ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json; charset=utf-8")
        .json(data)
}

pub fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("application/json; charset=utf-8")
        .json(ErrorBody {
            code,
            message: message.into(),
        })
}

/// 将 LinkPulseError 映射为 HTTP 响应
///
/// 内部错误只返回固定文案，原始错误写入日志。
pub fn error_from_linkpulse(err: &LinkPulseError) -> HttpResponse {
    if err.is_internal() {
        error!("{} [{}]: {}", err.error_type(), err.code(), err.message());
    } else {
        debug!("Request rejected: {}", err);
    }
    error_response(err.http_status(), err.error_code(), err.public_message())
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, LinkPulseError>) -> HttpResponse {
    match result {
        Ok(data) => json_ok(data),
        Err(e) => error_from_linkpulse(&e),
    }
}

/// 生成短链接使用的前缀：优先 `server.public_base_url`，否则取请求的 scheme + host
pub fn public_base_url(req: &HttpRequest, configured: Option<&str>) -> String {
    if let Some(base) = configured.map(str::trim).filter(|b| !b.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

/// 用请求的 User-Agent 与客户端 IP 构造点击事件
pub fn click_event_from_request(
    req: &HttpRequest,
    short_url: &str,
    trust_forwarded_for: bool,
) -> ClickEvent {
    let device = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(str::to_string);

    ClickEvent::new(short_url)
        .with_device(device)
        .with_ip(client_ip(req, trust_forwarded_for))
}
