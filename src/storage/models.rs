use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 短链接记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub short_url: String,
    pub long_url: String,
    pub alias: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub user_id: String,
    #[serde(default)]
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// 列表与仪表盘使用的投影
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub long_url: String,
    pub short_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl From<&Link> for LinkSummary {
    fn from(link: &Link) -> Self {
        Self {
            long_url: link.long_url.clone(),
            short_url: link.short_url.clone(),
            clicks: link.clicks,
            created_at: link.created_at,
            expiration_date: link.expiration_date,
        }
    }
}

impl From<Link> for LinkSummary {
    fn from(link: Link) -> Self {
        Self {
            long_url: link.long_url,
            short_url: link.short_url,
            clicks: link.clicks,
            created_at: link.created_at,
            expiration_date: link.expiration_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expiration_date: Option<DateTime<Utc>>) -> Link {
        Link {
            short_url: "ex1".into(),
            long_url: "https://example.com".into(),
            alias: Some("ex1".into()),
            expiration_date,
            user_id: "user123".into(),
            clicks: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(!link(None).is_expired_at(now));
        assert!(!link(Some(now + Duration::hours(1))).is_expired_at(now));
        assert!(link(Some(now - Duration::seconds(1))).is_expired_at(now));
        assert!(link(Some(now)).is_expired_at(now));
    }

    #[test]
    fn test_camel_case_json() {
        let value = serde_json::to_value(LinkSummary::from(&link(None))).unwrap();
        assert_eq!(value["longUrl"], "https://example.com");
        assert_eq!(value["shortUrl"], "ex1");
        assert_eq!(value["clicks"], 3);
        assert!(value["expirationDate"].is_null());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("userId").is_none());
    }
}
