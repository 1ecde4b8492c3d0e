use actix_web::http::header::{CACHE_CONTROL, LOCATION};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, trace};

use crate::api::helpers::{click_event_from_request, error_from_linkpulse};
use crate::runtime::AppContext;

pub const BANNER: &str = "LinkPulse backend is running";

pub struct RedirectService;

impl RedirectService {
    pub async fn index() -> impl Responder {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(BANNER)
    }

    /// 解析短码并 302 跳转
    ///
    /// 计数来源包含重定向时，同时记录一条点击事件（User-Agent + 客户端 IP）。
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        ctx: web::Data<AppContext>,
    ) -> impl Responder {
        let short_url = path.into_inner();
        trace!("Redirect requested for '{}'", short_url);

        let link = match ctx.link_service.resolve(&short_url).await {
            Ok(link) => link,
            Err(e) => return error_from_linkpulse(&e),
        };

        if ctx.link_service.click_source().counts_redirect() {
            ctx.analytics_service.record(click_event_from_request(
                &req,
                &short_url,
                ctx.config.server.trust_forwarded_for,
            ));
        }

        debug!("Redirecting '{}' -> {}", short_url, link.long_url);
        HttpResponse::Found()
            .insert_header((LOCATION, link.long_url))
            .insert_header((CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
            .finish()
    }
}
