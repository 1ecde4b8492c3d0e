//! HTTP API tests
//!
//! Full route table against a temporary SQLite database.

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::{LOCATION, USER_AGENT};
use actix_web::test::{self, TestRequest};
use actix_web::App;
use serde_json::{Value, json};

use common::{TEST_EMAIL, TEST_PASSWORD, create_context, create_context_with};
use linkpulse::api::configure_app;
use linkpulse::api::middleware::RequestIdMiddleware;
use linkpulse::config::ClickSource;
use linkpulse::runtime::AppContext;

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .configure(configure_app(Arc::clone(&$ctx))),
        )
        .await
    };
}

async fn shorten(ctx: &Arc<AppContext>, body: Value) -> (StatusCode, Value) {
    let app = test_app!(ctx);
    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header(("Host", "sho.rt"))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_rt::test]
async fn test_root_banner() {
    let (ctx, _dir) = create_context().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body = test::read_body(resp).await;
    assert_eq!(body, "LinkPulse backend is running");
}

#[actix_rt::test]
async fn test_health() {
    let (ctx, _dir) = create_context().await;
    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "sqlite");
    assert_eq!(body["analytics"]["enabled"], true);
}

#[actix_rt::test]
async fn test_shorten_alias_and_redirect() {
    let (ctx, _dir) = create_context().await;

    let (status, body) = shorten(
        &ctx,
        json!({
            "longUrl": "https://example.com",
            "alias": "ex1",
            "expirationDate": "",
            "userId": "user123"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "shortUrl": "http://sho.rt/ex1" }));

    let app = test_app!(ctx);
    let req = TestRequest::get()
        .uri("/ex1")
        .insert_header((USER_AGENT, "Mozilla/5.0 (Macintosh)"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(LOCATION).unwrap(), "https://example.com");

    assert_eq!(ctx.link_service.get("ex1").await.unwrap().clicks, 1);

    ctx.analytics_service.flush().await;
    let req = TestRequest::get().uri("/api/analytics/ex1/devices").to_request();
    let devices: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        devices,
        json!([{ "device": "Mozilla/5.0 (Macintosh)", "count": 1 }])
    );
}

#[actix_rt::test]
async fn test_shorten_uses_public_base_url() {
    let (ctx, _dir) = create_context_with(|c| {
        c.server.public_base_url = Some("https://lp.example.com/".to_string())
    })
    .await;

    let (status, body) = shorten(&ctx, json!({ "longUrl": "https://example.com/a" })).await;
    assert_eq!(status, StatusCode::OK);
    let short = body["shortUrl"].as_str().unwrap();
    let code = short.strip_prefix("https://lp.example.com/").unwrap();
    assert_eq!(code.len(), 6);
}

#[actix_rt::test]
async fn test_shorten_errors() {
    let (ctx, _dir) = create_context().await;

    let (status, body) = shorten(&ctx, json!({ "longUrl": "ftp://example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    let (status, body) = shorten(&ctx, json!({ "alias": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1000);

    let (status, _) = shorten(
        &ctx,
        json!({ "longUrl": "https://example.com", "alias": "dup" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = shorten(
        &ctx,
        json!({ "longUrl": "https://example.org", "alias": "dup" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3001);
}

#[actix_rt::test]
async fn test_redirect_not_found_and_expired() {
    let (ctx, _dir) = create_context().await;
    shorten(
        &ctx,
        json!({
            "longUrl": "https://example.com/old",
            "alias": "old",
            "expirationDate": "2001-09-09"
        }),
    )
    .await;

    let app = test_app!(ctx);

    let resp = test::call_service(&app, TestRequest::get().uri("/missing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "code": 3000, "message": "Short URL not found" }));

    let resp = test::call_service(&app, TestRequest::get().uri("/old").to_request()).await;
    assert_eq!(resp.status(), StatusCode::GONE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3003);
}

#[actix_rt::test]
async fn test_list_search_and_dashboard() {
    let (ctx, _dir) = create_context().await;
    for alias in ["Alpha", "alphabet", "beta"] {
        shorten(
            &ctx,
            json!({ "longUrl": format!("https://example.com/{}", alias), "alias": alias }),
        )
        .await;
    }

    let app = test_app!(ctx);

    let links: Value =
        test::call_and_read_body_json(&app, TestRequest::get().uri("/api/links").to_request())
            .await;
    assert_eq!(links.as_array().unwrap().len(), 3);
    assert!(links[0].get("shortUrl").is_some());
    assert!(links[0].get("userId").is_none());

    let found: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/search?q=ALPHA").to_request(),
    )
    .await;
    let mut codes: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["shortUrl"].as_str().unwrap())
        .collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["Alpha", "alphabet"]);

    let dashboard: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get().uri("/api/analytics").to_request(),
    )
    .await;
    let rows = dashboard.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["devices"] == json!([])));
}

#[actix_rt::test]
async fn test_explicit_click_endpoint() {
    let (ctx, _dir) =
        create_context_with(|c| c.links.click_source = ClickSource::Explicit).await;
    shorten(&ctx, json!({ "longUrl": "https://example.com", "alias": "ex1" })).await;

    let app = test_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/click/ex1")
        .insert_header((USER_AGENT, "curl/8.4.0"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Click count updated successfully");

    // 重定向不再计数，也不记录事件
    let resp = test::call_service(&app, TestRequest::get().uri("/ex1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    assert_eq!(ctx.link_service.get("ex1").await.unwrap().clicks, 1);
    ctx.analytics_service.flush().await;
    let devices = ctx.analytics_service.device_breakdown_for("ex1").await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].device.as_deref(), Some("curl/8.4.0"));

    let resp = test::call_service(
        &app,
        TestRequest::post().uri("/api/click/missing").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_login() {
    let (ctx, _dir) = create_context().await;
    let app = test_app!(ctx);

    let req = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"], json!({ "id": "user123", "email": TEST_EMAIL }));
    let token = body["token"].as_str().unwrap();
    assert!(ctx.auth_service.validate_token(token).is_ok());

    let req = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": TEST_EMAIL, "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "code": 2000, "message": "Invalid credentials" }));
    assert!(body.get("token").is_none());
}

#[actix_rt::test]
async fn test_require_token_guards_api() {
    let (ctx, _dir) = create_context_with(|c| c.auth.require_token = true).await;
    let app = test_app!(ctx);

    let resp =
        test::call_service(&app, TestRequest::get().uri("/api/links").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2002);

    // 登录接口本身不需要 token
    let req = TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }))
        .to_request();
    let login: Value = test::call_and_read_body_json(&app, req).await;
    let token = login["token"].as_str().unwrap();

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 重定向不受保护
    let resp = test::call_service(&app, TestRequest::get().uri("/nothing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
