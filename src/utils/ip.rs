use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 提取客户端 IP
///
/// 只有 `trust_forwarded_for` 开启时才读取转发头，否则使用 TCP 对端地址，
/// 防止直连客户端伪造 X-Forwarded-For。
pub fn client_ip(req: &HttpRequest, trust_forwarded_for: bool) -> Option<String> {
    if trust_forwarded_for && let Some(ip) = forwarded_ip_from_headers(req.headers()) {
        return Some(ip);
    }
    req.peer_addr().map(|addr| addr.ip().to_string())
}

/// 从请求头提取转发的 IP（X-Forwarded-For 第一个，其次 X-Real-IP）
pub fn forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_first_entry() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        assert_eq!(
            forwarded_ip_from_headers(req.headers()).as_deref(),
            Some("203.0.113.7")
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(
            forwarded_ip_from_headers(req.headers()).as_deref(),
            Some("198.51.100.2")
        );
    }

    #[test]
    fn test_untrusted_ignores_headers() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7"))
            .peer_addr("192.0.2.10:51000".parse().unwrap())
            .to_http_request();
        assert_eq!(client_ip(&req, false).as_deref(), Some("192.0.2.10"));
        assert_eq!(client_ip(&req, true).as_deref(), Some("203.0.113.7"));
    }
}
