//! Write operations for links

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, ExprTrait, QueryFilter, SqlErr};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::link_to_active_model;
use super::retry;
use crate::errors::{LinkPulseError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    /// 插入新链接，短码已存在时返回 `LinkAlreadyExists`
    pub async fn insert_link(&self, new_link: &Link) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry("insert_link", self.retry_config, || async {
            link::Entity::insert(link_to_active_model(new_link))
                .exec_without_returning(db)
                .await
        })
        .await;

        match result {
            Ok(_) => {
                info!("Short link created: {}", new_link.short_url);
                Ok(())
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(LinkPulseError::link_already_exists(format!(
                    "Short URL '{}' already exists",
                    new_link.short_url
                )))
            }
            Err(e) => Err(LinkPulseError::database_operation(format!(
                "Failed to insert link: {}",
                e
            ))),
        }
    }

    /// 原子地将 clicks 加 1（单条 UPDATE，不存在读改写竞争）
    pub async fn increment_clicks(&self, short_url: &str) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry("increment_clicks", self.retry_config, || async {
            link::Entity::update_many()
                .col_expr(
                    link::Column::Clicks,
                    Expr::col(link::Column::Clicks).add(Expr::val(1i64)),
                )
                .filter(link::Column::ShortUrl.eq(short_url))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| {
            LinkPulseError::database_operation(format!("Failed to increment clicks: {}", e))
        })?;

        if result.rows_affected == 0 {
            return Err(LinkPulseError::not_found("Short URL not found"));
        }

        debug!("Click counted for {}", short_url);
        Ok(())
    }
}
