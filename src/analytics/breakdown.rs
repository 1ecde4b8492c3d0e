//! 设备分布聚合
//!
//! 数据库按 (short_url, device) 分组计数，这里负责二次分组和排序。

use std::collections::HashMap;

use serde::Serialize;

/// 数据库分组计数的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRow {
    pub short_url: String,
    pub device: Option<String>,
    pub count: u64,
}

/// 单个设备（User-Agent）的点击数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCount {
    pub device: Option<String>,
    pub count: u64,
}

/// 按点击数降序，相同点击数按设备字符串升序（无 UA 的排在最前）
pub fn sort_devices(devices: &mut [DeviceCount]) {
    devices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.device.cmp(&b.device)));
}

/// 将 (short_url, device, count) 行按 short_url 归组
pub fn group_by_short_url(rows: Vec<DeviceRow>) -> HashMap<String, Vec<DeviceCount>> {
    let mut grouped: HashMap<String, Vec<DeviceCount>> = HashMap::new();
    for row in rows {
        grouped.entry(row.short_url).or_default().push(DeviceCount {
            device: row.device,
            count: row.count,
        });
    }
    for devices in grouped.values_mut() {
        sort_devices(devices);
    }
    grouped
}
