//! Single-account login backed by configuration

use serde::Serialize;
use tracing::{info, warn};

use crate::api::jwt::{Claims, JwtService};
use crate::config::AuthConfig;
use crate::errors::{LinkPulseError, Result};
use crate::utils::password::{is_argon2_hash, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: LoginUser,
}

pub struct AuthService {
    config: AuthConfig,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        if config.email.is_empty() || config.password.is_empty() {
            warn!("auth.email / auth.password not configured, login is disabled");
        } else if !is_argon2_hash(&config.password) {
            warn!(
                "auth.password is stored in plaintext, run `linkpulse hash-password` to generate an Argon2 hash"
            );
        }

        let jwt = JwtService::from_config(&config);
        Self { config, jwt }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.email.is_empty() && !self.config.password.is_empty()
    }

    pub fn require_token(&self) -> bool {
        self.config.require_token
    }

    /// 邮箱和密码都匹配时才签发 token
    pub fn login(&self, email: &str, password: &str) -> Result<LoginResult> {
        if !self.is_configured() {
            return Err(LinkPulseError::auth_failed(INVALID_CREDENTIALS));
        }

        // 邮箱不匹配时也执行密码校验
        let email_ok = email == self.config.email;
        let password_ok = verify_password(password, &self.config.password)?;

        if !(email_ok && password_ok) {
            warn!("Login failed for '{}'", email);
            return Err(LinkPulseError::auth_failed(INVALID_CREDENTIALS));
        }

        let token = self.jwt.generate_token(&self.config.user_id, email)?;
        info!("User '{}' logged in", self.config.user_id);

        Ok(LoginResult {
            token,
            user: LoginUser {
                id: self.config.user_id.clone(),
                email: self.config.email.clone(),
            },
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        self.jwt
            .validate_token(token)
            .map_err(|_| LinkPulseError::token_invalid("Invalid or expired token"))
    }
}
