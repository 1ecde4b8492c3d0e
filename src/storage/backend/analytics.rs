//! 点击事件聚合查询

use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QuerySelect};

use super::SeaOrmStorage;
use super::retry;
use crate::analytics::DeviceRow;
use crate::errors::{LinkPulseError, Result};

use migration::entities::click_event;

#[derive(Debug, FromQueryResult)]
struct DeviceCountRow {
    short_url: String,
    device: Option<String>,
    count: i64,
}

impl From<DeviceCountRow> for DeviceRow {
    fn from(row: DeviceCountRow) -> Self {
        DeviceRow {
            short_url: row.short_url,
            device: row.device,
            count: row.count.max(0) as u64,
        }
    }
}

impl SeaOrmStorage {
    /// 按 (short_url, device) 分组计数；`short_url` 为 None 时统计全部
    pub async fn device_counts(&self, short_url: Option<&str>) -> Result<Vec<DeviceRow>> {
        let db = &self.db;

        let rows = retry::with_retry("device_counts", self.retry_config, || async {
            let mut query = click_event::Entity::find()
                .select_only()
                .column(click_event::Column::ShortUrl)
                .column(click_event::Column::Device)
                .column_as(click_event::Column::Id.count(), "count");

            if let Some(code) = short_url {
                query = query.filter(click_event::Column::ShortUrl.eq(code));
            }

            query
                .group_by(click_event::Column::ShortUrl)
                .group_by(click_event::Column::Device)
                .into_model::<DeviceCountRow>()
                .all(db)
                .await
        })
        .await
        .map_err(|e| {
            LinkPulseError::database_operation(format!("Failed to aggregate devices: {}", e))
        })?;

        Ok(rows.into_iter().map(DeviceRow::from).collect())
    }
}
