pub mod breakdown;
pub mod recorder;
pub mod sink;

pub use breakdown::{DeviceCount, DeviceRow, group_by_short_url, sort_devices};
pub use recorder::AnalyticsRecorder;
pub use sink::ClickEventSink;

use chrono::{DateTime, Utc};

/// 一次成功重定向产生的点击事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub short_url: String,
    /// 原始 User-Agent
    pub device: Option<String>,
    pub ip: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(short_url: impl Into<String>) -> Self {
        Self {
            short_url: short_url.into(),
            device: None,
            ip: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_device(mut self, device: Option<String>) -> Self {
        self.device = device;
        self
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip = ip;
        self
    }
}
