use super::ClickEvent;

/// 点击事件持久化目标
#[async_trait::async_trait]
pub trait ClickEventSink: Send + Sync {
    /// 批量追加事件，返回错误时整批视为失败
    async fn append_events(&self, events: Vec<ClickEvent>) -> anyhow::Result<()>;
}
