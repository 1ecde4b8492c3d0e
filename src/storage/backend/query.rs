//! Read-only link queries

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{EntityTrait, ExprTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::model_to_link;
use super::retry;
use crate::errors::{LinkPulseError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    pub async fn get(&self, short_url: &str) -> Result<Option<Link>> {
        let db = &self.db;

        let model = retry::with_retry("get_link", self.retry_config, || async {
            link::Entity::find_by_id(short_url.to_string()).one(db).await
        })
        .await
        .map_err(|e| LinkPulseError::database_operation(format!("Failed to query link: {}", e)))?;

        Ok(model.map(model_to_link))
    }

    pub async fn exists(&self, short_url: &str) -> Result<bool> {
        Ok(self.get(short_url).await?.is_some())
    }

    /// 全部链接，按创建时间倒序
    pub async fn list_all(&self) -> Result<Vec<Link>> {
        let db = &self.db;

        let models = retry::with_retry("list_links", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .order_by_asc(link::Column::ShortUrl)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkPulseError::database_operation(format!("Failed to list links: {}", e)))?;

        debug!("Loaded {} links", models.len());
        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// `short_url` 不区分大小写的子串匹配，输入按字面量处理（`%`、`_` 不是通配符）
    pub async fn search(&self, term: &str) -> Result<Vec<Link>> {
        let db = &self.db;
        let pattern = like_pattern(term);

        let models = retry::with_retry("search_links", self.retry_config, || async {
            link::Entity::find()
                .filter(
                    Expr::expr(Func::lower(Expr::col(link::Column::ShortUrl)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .order_by_desc(link::Column::CreatedAt)
                .order_by_asc(link::Column::ShortUrl)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkPulseError::database_operation(format!("Failed to search links: {}", e)))?;

        Ok(models.into_iter().map(model_to_link).collect())
    }
}

/// 转义 LIKE 元字符后包成 `%term%`（转义符为 `\`）
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("Promo"), "%promo%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
