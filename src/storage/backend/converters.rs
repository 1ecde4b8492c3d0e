use sea_orm::ActiveValue::{NotSet, Set};

use crate::analytics::ClickEvent;
use crate::storage::Link;
use migration::entities::{click_event, link};

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        short_url: model.short_url,
        long_url: model.long_url,
        alias: model.alias,
        expiration_date: model.expiration_date,
        user_id: model.user_id,
        clicks: model.clicks.max(0) as u64,
        created_at: model.created_at,
    }
}

/// 新建链接的 ActiveModel
pub fn link_to_active_model(link: &Link) -> link::ActiveModel {
    link::ActiveModel {
        short_url: Set(link.short_url.clone()),
        long_url: Set(link.long_url.clone()),
        alias: Set(link.alias.clone()),
        expiration_date: Set(link.expiration_date),
        user_id: Set(link.user_id.clone()),
        clicks: Set(i64::try_from(link.clicks).unwrap_or(i64::MAX)),
        created_at: Set(link.created_at),
    }
}

pub fn event_to_active_model(event: &ClickEvent) -> click_event::ActiveModel {
    click_event::ActiveModel {
        id: NotSet,
        short_url: Set(event.short_url.clone()),
        device: Set(event.device.clone()),
        ip: Set(event.ip.clone()),
        timestamp: Set(event.timestamp),
    }
}
