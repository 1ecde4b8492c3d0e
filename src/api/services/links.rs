//! 短链接的创建、列表、搜索与显式点击

use actix_web::{HttpRequest, Responder, web};
use tracing::{debug, info};

use crate::api::helpers::{api_result, click_event_from_request, public_base_url};
use crate::api::types::{MessageResponse, SearchQuery, ShortenRequest, ShortenResponse};
use crate::config::ClickSource;
use crate::runtime::AppContext;
use crate::services::{CreateLinkRequest, ExplicitClick};
use crate::storage::LinkSummary;

pub struct LinkApiService;

impl LinkApiService {
    pub async fn shorten(
        req: HttpRequest,
        body: web::Json<ShortenRequest>,
        ctx: web::Data<AppContext>,
    ) -> impl Responder {
        let body = body.into_inner();
        let request = CreateLinkRequest {
            long_url: body.long_url,
            alias: body.alias,
            expiration_date: body.expiration_date,
            user_id: body.user_id,
        };

        let result = ctx.link_service.create_link(request).await.map(|created| {
            let base = public_base_url(&req, ctx.config.server.public_base_url.as_deref());
            info!(
                "Created short URL '{}' -> {} (generated: {})",
                created.link.short_url, created.link.long_url, created.generated_code
            );
            ShortenResponse {
                short_url: format!("{}/{}", base, created.link.short_url),
            }
        });

        api_result(result)
    }

    pub async fn list(ctx: web::Data<AppContext>) -> impl Responder {
        let result = ctx
            .link_service
            .list_all()
            .await
            .map(|links| links.iter().map(LinkSummary::from).collect::<Vec<_>>());
        api_result(result)
    }

    pub async fn search(
        query: web::Query<SearchQuery>,
        ctx: web::Data<AppContext>,
    ) -> impl Responder {
        api_result(ctx.link_service.search(&query.q).await)
    }

    /// 前端在跳转前调用的计数接口
    pub async fn click(
        req: HttpRequest,
        path: web::Path<String>,
        ctx: web::Data<AppContext>,
    ) -> impl Responder {
        let short_url = path.into_inner();

        let result = ctx
            .link_service
            .record_explicit_click(&short_url)
            .await
            .map(|outcome| match outcome {
                ExplicitClick::Counted => {
                    // 仅在显式接口是唯一计数来源时记录事件，保持事件数与 clicks 一致
                    if ctx.link_service.click_source() == ClickSource::Explicit {
                        ctx.analytics_service.record(click_event_from_request(
                            &req,
                            &short_url,
                            ctx.config.server.trust_forwarded_for,
                        ));
                    }
                    MessageResponse {
                        message: "Click count updated successfully".to_string(),
                    }
                }
                ExplicitClick::Ignored => {
                    debug!("Explicit click for '{}' not counted", short_url);
                    MessageResponse {
                        message: "Click acknowledged".to_string(),
                    }
                }
            });

        api_result(result)
    }
}

/// `/api` 下的链接路由
pub fn link_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/shorten", web::post().to(LinkApiService::shorten))
        .route("/links", web::get().to(LinkApiService::list))
        .route("/search", web::get().to(LinkApiService::search))
        .route("/click/{short_url}", web::post().to(LinkApiService::click));
}
