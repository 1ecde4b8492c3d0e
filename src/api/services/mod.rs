pub mod analytics;
pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;

pub use analytics::{AnalyticsApiService, analytics_routes};
pub use auth::LoginService;
pub use health::HealthService;
pub use links::{LinkApiService, link_routes};
pub use redirect::RedirectService;
