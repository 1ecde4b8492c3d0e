use actix_web::{Responder, web};

use crate::api::helpers::api_result;
use crate::api::types::LoginRequest;
use crate::runtime::AppContext;

pub struct LoginService;

impl LoginService {
    pub async fn login(
        body: web::Json<LoginRequest>,
        ctx: web::Data<AppContext>,
    ) -> impl Responder {
        let LoginRequest { email, password } = body.into_inner();
        api_result(ctx.auth_service.login(&email, &password))
    }
}
