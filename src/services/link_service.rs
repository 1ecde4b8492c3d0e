//! Link registry: creation, resolution and click counting

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::{ClickSource, LinksConfig};
use crate::errors::{LinkPulseError, Result};
use crate::storage::{Link, SeaOrmStorage};
use crate::utils::time_parser::parse_expiration;
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_code, is_reserved_code, is_valid_alias};

/// 未提供 userId 时的归属
pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub long_url: String,
    /// 自定义短码；空字符串视为未提供
    pub alias: Option<String>,
    /// RFC 3339、`YYYY-MM-DD` 或相对时间（`7d`）
    pub expiration_date: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: Link,
    pub generated_code: bool,
}

/// `POST /api/click` 的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitClick {
    Counted,
    /// 链接存在，但当前计数来源不包含显式接口
    Ignored,
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
    config: LinksConfig,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: LinksConfig) -> Self {
        Self { storage, config }
    }

    pub fn click_source(&self) -> ClickSource {
        self.config.click_source
    }

    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        validate_url(&req.long_url)?;
        let expiration_date = parse_expiration(req.expiration_date.as_deref())?;
        let user_id = req
            .user_id
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| ANONYMOUS_USER.to_string());

        let alias = req
            .alias
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        let mut link = Link {
            short_url: String::new(),
            long_url: req.long_url.trim().to_string(),
            alias: alias.clone(),
            expiration_date,
            user_id,
            clicks: 0,
            created_at: Utc::now(),
        };

        if let Some(alias) = alias {
            if !is_valid_alias(&alias) {
                return Err(LinkPulseError::validation(format!(
                    "Invalid alias '{}': use 1-64 letters, digits, '_', '-' or '.'",
                    alias
                )));
            }
            if is_reserved_code(&alias) {
                return Err(LinkPulseError::validation(format!(
                    "Alias '{}' is reserved",
                    alias
                )));
            }

            link.short_url = alias;
            self.storage.insert_link(&link).await?;
            return Ok(LinkCreateResult {
                link,
                generated_code: false,
            });
        }

        for attempt in 1..=self.config.max_generate_attempts {
            link.short_url = generate_random_code(self.config.code_length);
            match self.storage.insert_link(&link).await {
                Ok(()) => {
                    return Ok(LinkCreateResult {
                        link,
                        generated_code: true,
                    });
                }
                Err(LinkPulseError::LinkAlreadyExists(_)) => {
                    warn!(
                        "Generated code '{}' collided (attempt {}/{})",
                        link.short_url, attempt, self.config.max_generate_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(LinkPulseError::database_operation(format!(
            "Could not generate a unique short code after {} attempts",
            self.config.max_generate_attempts
        )))
    }

    pub async fn get(&self, short_url: &str) -> Result<Link> {
        self.storage
            .get(short_url)
            .await?
            .ok_or_else(|| LinkPulseError::not_found("Short URL not found"))
    }

    /// 解析短码并计数
    ///
    /// 过期检查由 `links.enforce_expiration` 控制。计数来源包含重定向时
    /// 使用原子 UPDATE 递增，返回的 `Link.clicks` 为递增前的值。
    pub async fn resolve(&self, short_url: &str) -> Result<Link> {
        let link = self.get(short_url).await?;

        if self.config.enforce_expiration && link.is_expired() {
            debug!("Short URL '{}' expired", short_url);
            return Err(LinkPulseError::link_expired("Short URL has expired"));
        }

        if self.config.click_source.counts_redirect() {
            self.storage.increment_clicks(short_url).await?;
        }

        Ok(link)
    }

    /// 显式计数接口（前端在打开链接时调用）
    pub async fn record_explicit_click(&self, short_url: &str) -> Result<ExplicitClick> {
        if self.config.click_source.counts_explicit() {
            self.storage.increment_clicks(short_url).await?;
            return Ok(ExplicitClick::Counted);
        }

        if !self.storage.exists(short_url).await? {
            return Err(LinkPulseError::not_found("Short URL not found"));
        }
        debug!(
            "Explicit click for '{}' ignored, click source is {}",
            short_url, self.config.click_source
        );
        Ok(ExplicitClick::Ignored)
    }

    pub async fn list_all(&self) -> Result<Vec<Link>> {
        self.storage.list_all().await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Link>> {
        let links = self.storage.search(term).await?;
        debug!("Search '{}' matched {} links", term, links.len());
        Ok(links)
    }
}
