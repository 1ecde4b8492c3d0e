//! 点击事件记录器
//!
//! 请求路径只把事件放进内存缓冲区，由后台任务批量写入存储：
//! - 定时刷盘（`flush_interval`）
//! - 缓冲区达到 `max_batch_size` 时触发刷盘
//! - 关闭时手动 `flush()`
//!
//! 每次写入最多 `max_batch_size` 条，积压的事件分多批写入。
//! 某一批写入失败只记录日志并丢弃该批，不影响其余批次和重定向响应。

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, trace, warn};

use super::{ClickEvent, ClickEventSink};
use crate::config::AnalyticsConfig;

/// 事件缓冲区，key 为单调递增的序号，用于刷盘时恢复写入顺序
struct EventBuffer {
    data: DashMap<u64, ClickEvent>,
    next_id: AtomicU64,
    /// 刷盘锁，防止并发刷盘
    flush_lock: Mutex<()>,
    /// 是否已有阈值触发的刷盘任务（防止重复 spawn）
    flush_pending: AtomicBool,
}

impl EventBuffer {
    fn new() -> Self {
        Self {
            data: DashMap::new(),
            next_id: AtomicU64::new(0),
            flush_lock: Mutex::new(()),
            flush_pending: AtomicBool::new(false),
        }
    }

    fn push(&self, event: ClickEvent) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.data.insert(id, event);
        self.data.len()
    }

    /// 取出快照中的全部事件，窗口期内新写入的事件留给下一轮
    fn drain(&self) -> Vec<ClickEvent> {
        let mut keys: Vec<u64> = self.data.iter().map(|r| *r.key()).collect();
        keys.sort_unstable();

        keys.into_iter()
            .filter_map(|key| self.data.remove(&key).map(|(_, event)| event))
            .collect()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[derive(Clone)]
pub struct AnalyticsRecorder {
    buffer: Arc<EventBuffer>,
    sink: Arc<dyn ClickEventSink>,
    flush_interval: Duration,
    max_batch_size: usize,
    enabled: bool,
    record_ip: bool,
}

impl AnalyticsRecorder {
    pub fn new(
        sink: Arc<dyn ClickEventSink>,
        flush_interval: Duration,
        max_batch_size: usize,
    ) -> Self {
        Self {
            buffer: Arc::new(EventBuffer::new()),
            sink,
            flush_interval,
            max_batch_size: max_batch_size.max(1),
            enabled: true,
            record_ip: true,
        }
    }

    pub fn from_config(sink: Arc<dyn ClickEventSink>, config: &AnalyticsConfig) -> Self {
        Self {
            enabled: config.enabled,
            record_ip: config.record_ip,
            ..Self::new(
                sink,
                Duration::from_secs(config.flush_interval_secs),
                config.max_batch_size,
            )
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 记录一次点击事件，立即返回
    pub fn record(&self, mut event: ClickEvent) {
        if !self.enabled {
            return;
        }
        if !self.record_ip {
            event.ip = None;
        }

        let pending = self.buffer.push(event);
        trace!("AnalyticsRecorder: {} events buffered", pending);

        if pending >= self.max_batch_size {
            self.spawn_threshold_flush();
        }
    }

    fn spawn_threshold_flush(&self) {
        // 只有成功将 flush_pending 从 false 置为 true 的调用方才 spawn
        if self
            .buffer
            .flush_pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
            .is_err()
        {
            return;
        }

        let buffer = Arc::clone(&self.buffer);
        let sink = Arc::clone(&self.sink);
        let batch_size = self.max_batch_size;
        tokio::spawn(async move {
            if let Ok(_guard) = buffer.flush_lock.try_lock() {
                Self::flush_buffer(&buffer, &sink, batch_size).await;
            } else {
                trace!("AnalyticsRecorder: flush already in progress, skipping");
            }
            buffer.flush_pending.store(false, Ordering::Release);
        });
    }

    /// 后台定时刷盘循环
    pub async fn run_flush_loop(&self) {
        loop {
            sleep(self.flush_interval).await;

            if let Ok(_guard) = self.buffer.flush_lock.try_lock() {
                Self::flush_buffer(&self.buffer, &self.sink, self.max_batch_size).await;
            } else {
                trace!("AnalyticsRecorder: flush already in progress, skipping tick");
            }
        }
    }

    pub fn spawn_background_task(&self) -> JoinHandle<()> {
        let recorder = self.clone();
        tokio::spawn(async move { recorder.run_flush_loop().await })
    }

    /// 手动刷盘，等待正在进行的刷盘完成后再执行
    pub async fn flush(&self) {
        debug!("AnalyticsRecorder: manual flush triggered");
        let _guard = self.buffer.flush_lock.lock().await;
        Self::flush_buffer(&self.buffer, &self.sink, self.max_batch_size).await;
    }

    async fn flush_buffer(
        buffer: &EventBuffer,
        sink: &Arc<dyn ClickEventSink>,
        batch_size: usize,
    ) {
        let events = buffer.drain();
        if events.is_empty() {
            return;
        }

        let total = events.len();
        let mut written = 0;
        for chunk in events.chunks(batch_size) {
            let count = chunk.len();
            match sink.append_events(chunk.to_vec()).await {
                Ok(()) => written += count,
                Err(e) => warn!(
                    "AnalyticsRecorder: failed to persist {} events, batch dropped: {}",
                    count, e
                ),
            }
        }
        debug!("AnalyticsRecorder: flushed {}/{} events", written, total);
    }

    /// 当前缓冲区中的事件数
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
