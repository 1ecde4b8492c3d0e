//! 目标 URL 校验
//!
//! 只接受带主机名的 http/https 绝对地址。

use url::Url;

use crate::errors::{LinkPulseError, Result};

/// 明确拒绝的协议，即便解析成功也不允许作为重定向目标
const BLOCKED_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LinkPulseError::invalid_url("URL cannot be empty"));
    }

    let parsed = Url::parse(raw)
        .map_err(|e| LinkPulseError::invalid_url(format!("Invalid URL format: {}", e)))?;

    let scheme = parsed.scheme();
    if BLOCKED_SCHEMES.contains(&scheme) {
        return Err(LinkPulseError::invalid_url(format!(
            "URL scheme '{}:' is not allowed",
            scheme
        )));
    }
    if scheme != "http" && scheme != "https" {
        return Err(LinkPulseError::invalid_url(
            "URL must start with http:// or https://",
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(LinkPulseError::invalid_url("URL must contain a host"));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://localhost:3000/path?q=1#frag").is_ok());
        assert!(validate_url("  https://example.com/trim  ").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        let err = validate_url("   ").unwrap_err();
        assert_eq!(err.message(), "URL cannot be empty");
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        for url in [
            "javascript:alert(1)",
            "JAVASCRIPT:alert(1)",
            "data:text/html,<b>x</b>",
            "file:///etc/passwd",
        ] {
            let err = validate_url(url).unwrap_err();
            assert!(matches!(err, LinkPulseError::InvalidUrl(_)), "{}", url);
        }
    }

    #[test]
    fn test_rejects_other_schemes_and_relative() {
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("/relative/path").is_err());
    }
}
