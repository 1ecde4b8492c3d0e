//! Analytics tests
//!
//! Event recording through the buffered recorder and device aggregates from SQLite.

mod common;

use std::time::Duration;

use common::create_context_with;
use linkpulse::analytics::ClickEvent;
use linkpulse::config::MAX_ANALYTICS_BATCH_SIZE;
use linkpulse::services::CreateLinkRequest;

async fn create_alias(ctx: &linkpulse::runtime::AppContext, alias: &str) {
    ctx.link_service
        .create_link(CreateLinkRequest {
            long_url: format!("https://example.com/{}", alias),
            alias: Some(alias.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
}

fn event(short_url: &str, device: Option<&str>) -> ClickEvent {
    ClickEvent::new(short_url)
        .with_device(device.map(String::from))
        .with_ip(Some("192.0.2.1".to_string()))
}

#[tokio::test]
async fn test_device_breakdown_sums_to_event_count() {
    let (ctx, _dir) = create_context_with(|_| {}).await;
    create_alias(&ctx, "ex1").await;
    let analytics = &ctx.analytics_service;

    let devices = [
        Some("Mozilla/5.0 (iPhone)"),
        Some("curl/8.4.0"),
        Some("Mozilla/5.0 (iPhone)"),
        None,
        Some("Mozilla/5.0 (iPhone)"),
        Some("curl/8.4.0"),
    ];
    for device in devices {
        analytics.record(event("ex1", device));
    }
    assert_eq!(analytics.recorder().pending(), devices.len());
    analytics.flush().await;

    let breakdown = analytics.device_breakdown_for("ex1").await.unwrap();
    let total: u64 = breakdown.iter().map(|d| d.count).sum();
    assert_eq!(total, devices.len() as u64);

    // count 降序，同数按设备升序
    let pairs: Vec<(Option<&str>, u64)> = breakdown
        .iter()
        .map(|d| (d.device.as_deref(), d.count))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Some("Mozilla/5.0 (iPhone)"), 3),
            (Some("curl/8.4.0"), 2),
            (None, 1),
        ]
    );
}

#[tokio::test]
async fn test_breakdown_for_unknown_code_is_empty() {
    let (ctx, _dir) = create_context_with(|_| {}).await;
    let breakdown = ctx
        .analytics_service
        .device_breakdown_for("missing")
        .await
        .unwrap();
    assert!(breakdown.is_empty());
}

#[tokio::test]
async fn test_breakdown_all_groups_by_short_url() {
    let (ctx, _dir) = create_context_with(|_| {}).await;
    create_alias(&ctx, "a").await;
    create_alias(&ctx, "b").await;
    let analytics = &ctx.analytics_service;

    analytics.record(event("a", Some("UA-1")));
    analytics.record(event("a", Some("UA-2")));
    analytics.record(event("b", Some("UA-1")));
    analytics.flush().await;

    let all = analytics.device_breakdown_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["a"].iter().map(|d| d.count).sum::<u64>(), 2);
    assert_eq!(all["b"].len(), 1);
    assert_eq!(all["b"][0].device.as_deref(), Some("UA-1"));
}

#[tokio::test]
async fn test_dashboard_includes_links_without_events() {
    let (ctx, _dir) = create_context_with(|_| {}).await;
    create_alias(&ctx, "quiet").await;
    create_alias(&ctx, "busy").await;

    ctx.link_service.resolve("busy").await.unwrap();
    ctx.analytics_service.record(event("busy", Some("UA-1")));
    ctx.analytics_service.flush().await;

    let dashboard = ctx.analytics_service.dashboard().await.unwrap();
    assert_eq!(dashboard.len(), 2);

    let busy = dashboard.iter().find(|d| d.link.short_url == "busy").unwrap();
    assert_eq!(busy.link.clicks, 1);
    assert_eq!(busy.devices.len(), 1);

    let quiet = dashboard.iter().find(|d| d.link.short_url == "quiet").unwrap();
    assert_eq!(quiet.link.clicks, 0);
    assert!(quiet.devices.is_empty());

    let json = serde_json::to_value(busy).unwrap();
    assert_eq!(json["shortUrl"], "busy");
    assert_eq!(json["longUrl"], "https://example.com/busy");
    assert_eq!(json["devices"][0]["device"], "UA-1");
    assert_eq!(json["devices"][0]["count"], 1);
}

#[tokio::test]
async fn test_batch_threshold_flushes_to_storage() {
    let (ctx, _dir) = create_context_with(|c| c.analytics.max_batch_size = 3).await;
    create_alias(&ctx, "ex1").await;

    for _ in 0..3 {
        ctx.analytics_service.record(event("ex1", Some("UA")));
    }

    let mut total = 0;
    for _ in 0..100 {
        total = ctx
            .analytics_service
            .device_breakdown_for("ex1")
            .await
            .unwrap()
            .iter()
            .map(|d| d.count)
            .sum::<u64>();
        if total == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_backlog_larger_than_batch_size_is_fully_written() {
    let (ctx, _dir) = create_context_with(|_| {}).await;
    create_alias(&ctx, "big").await;

    let batch_size = ctx.config.analytics.max_batch_size;
    assert_eq!(batch_size, MAX_ANALYTICS_BATCH_SIZE);
    let recorded = batch_size + 4000;
    for i in 0..recorded {
        let device = if i % 2 == 0 { "UA-even" } else { "UA-odd" };
        ctx.analytics_service.record(event("big", Some(device)));
    }
    ctx.analytics_service.flush().await;

    let breakdown = ctx.analytics_service.device_breakdown_for("big").await.unwrap();
    let total: u64 = breakdown.iter().map(|d| d.count).sum();
    assert_eq!(total, recorded as u64);
    assert_eq!(ctx.analytics_service.recorder().pending(), 0);
}

#[tokio::test]
async fn test_disabled_analytics_records_nothing() {
    let (ctx, _dir) = create_context_with(|c| c.analytics.enabled = false).await;
    create_alias(&ctx, "ex1").await;

    ctx.analytics_service.record(event("ex1", Some("UA")));
    ctx.analytics_service.flush().await;

    assert!(
        ctx.analytics_service
            .device_breakdown_for("ex1")
            .await
            .unwrap()
            .is_empty()
    );
}
