use actix_web::{Responder, web};

use crate::api::helpers::api_result;
use crate::runtime::AppContext;

pub struct AnalyticsApiService;

impl AnalyticsApiService {
    /// 全部链接及其设备分布
    pub async fn dashboard(ctx: web::Data<AppContext>) -> impl Responder {
        api_result(ctx.analytics_service.dashboard().await)
    }

    pub async fn devices(path: web::Path<String>, ctx: web::Data<AppContext>) -> impl Responder {
        let short_url = path.into_inner();
        api_result(ctx.analytics_service.device_breakdown_for(&short_url).await)
    }
}

pub fn analytics_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/analytics", web::get().to(AnalyticsApiService::dashboard))
        .route(
            "/analytics/{short_url}/devices",
            web::get().to(AnalyticsApiService::devices),
        );
}
