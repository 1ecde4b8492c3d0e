//! Click analytics: event recording and device aggregates

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::analytics::{
    AnalyticsRecorder, ClickEvent, DeviceCount, group_by_short_url, sort_devices,
};
use crate::errors::Result;
use crate::storage::{LinkSummary, SeaOrmStorage};

/// 仪表盘中的一行：链接投影 + 设备分布
#[derive(Debug, Clone, Serialize)]
pub struct LinkAnalytics {
    #[serde(flatten)]
    pub link: LinkSummary,
    pub devices: Vec<DeviceCount>,
}

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    recorder: AnalyticsRecorder,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>, recorder: AnalyticsRecorder) -> Self {
        Self { storage, recorder }
    }

    pub fn recorder(&self) -> &AnalyticsRecorder {
        &self.recorder
    }

    /// 记录点击事件（不等待持久化）
    pub fn record(&self, event: ClickEvent) {
        self.recorder.record(event);
    }

    pub async fn flush(&self) {
        self.recorder.flush().await;
    }

    pub async fn device_breakdown_all(&self) -> Result<HashMap<String, Vec<DeviceCount>>> {
        let rows = self.storage.device_counts(None).await?;
        Ok(group_by_short_url(rows))
    }

    /// 单个短码的设备分布；没有事件时返回空列表
    pub async fn device_breakdown_for(&self, short_url: &str) -> Result<Vec<DeviceCount>> {
        let rows = self.storage.device_counts(Some(short_url)).await?;
        let mut devices: Vec<DeviceCount> = rows
            .into_iter()
            .map(|row| DeviceCount {
                device: row.device,
                count: row.count,
            })
            .collect();
        sort_devices(&mut devices);
        Ok(devices)
    }

    /// 全部链接及其设备分布
    pub async fn dashboard(&self) -> Result<Vec<LinkAnalytics>> {
        let links = self.storage.list_all().await?;
        let mut breakdown = self.device_breakdown_all().await?;

        Ok(links
            .into_iter()
            .map(|link| {
                let devices = breakdown.remove(&link.short_url).unwrap_or_default();
                LinkAnalytics {
                    link: LinkSummary::from(link),
                    devices,
                }
            })
            .collect())
    }
}
