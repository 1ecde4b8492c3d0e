//! Optional bearer-token guard for `/api/*`
//!
//! 仅在 `auth.require_token = true` 时生效；登录接口与 CORS 预检请求直接放行。
//! 验证通过后把 `Claims` 放入 request extensions。

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::AUTHORIZATION},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, trace};

use crate::api::error_code::ErrorCode;
use crate::api::helpers::error_response;
use crate::services::AuthService;

const LOGIN_PATH: &str = "/api/login";

#[derive(Clone)]
pub struct BearerAuth {
    auth: Arc<AuthService>,
}

impl BearerAuth {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            auth: Arc::clone(&self.auth),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    auth: Arc<AuthService>,
}

/// 从 Authorization header 提取 Bearer token
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let auth = Arc::clone(&self.auth);

        Box::pin(async move {
            let bypass = !auth.require_token()
                || req.method() == Method::OPTIONS
                || req.path() == LOGIN_PATH;
            if bypass {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let Some(token) = extract_bearer_token(&req) else {
                info!("Rejected {} {}: missing bearer token", req.method(), req.path());
                let resp = error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Missing bearer token",
                );
                return Ok(req.into_response(resp).map_into_right_body());
            };

            match auth.validate_token(&token) {
                Ok(claims) => {
                    trace!("Bearer token accepted for {}", claims.sub);
                    req.extensions_mut().insert(claims);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(e) => {
                    info!("Rejected {} {}: {}", req.method(), req.path(), e);
                    let resp = error_response(e.http_status(), e.error_code(), e.public_message());
                    Ok(req.into_response(resp).map_into_right_body())
                }
            }
        })
    }
}
