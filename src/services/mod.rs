//! Service layer for business logic
//!
//! HTTP handlers stay thin and delegate to these services.

mod analytics_service;
mod auth_service;
mod link_service;

pub use analytics_service::*;
pub use auth_service::*;
pub use link_service::*;
