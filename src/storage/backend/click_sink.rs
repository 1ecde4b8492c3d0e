use async_trait::async_trait;
use sea_orm::EntityTrait;
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::event_to_active_model;
use super::retry;
use crate::analytics::{ClickEvent, ClickEventSink};

use migration::entities::click_event;

#[async_trait]
impl ClickEventSink for SeaOrmStorage {
    async fn append_events(&self, events: Vec<ClickEvent>) -> anyhow::Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let models: Vec<click_event::ActiveModel> =
            events.iter().map(event_to_active_model).collect();

        let db = &self.db;
        retry::with_retry("append_events", self.retry_config, || async {
            click_event::Entity::insert_many(models.clone())
                .exec(db)
                .await
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert click events: {}", e))?;

        debug!(
            "{} click events written to {}",
            events.len(),
            self.backend_name.to_uppercase()
        );
        Ok(())
    }
}
