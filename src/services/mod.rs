pub mod analytics_client;
pub mod analytics_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod game_service;
pub mod user_service;

pub use analytics_client::{AnalyticsUpstream, HttpAnalyticsClient};
pub use analytics_service::AnalyticsService;
pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use game_service::GameService;
pub use user_service::UserService;
