pub mod analytics_repository;
pub mod dashboard_repository;
pub mod game_repository;
pub mod user_repository;

pub use analytics_repository::{AnalyticsRepository, PgAnalyticsRepository};
pub use dashboard_repository::{DashboardRepository, PgDashboardRepository};
pub use game_repository::{GameRepository, PgGameRepository};
pub use user_repository::{PgUserRepository, UserRepository};

/// Substring pattern for `ILIKE` that matches `search` literally. `%`, `_`
/// and the backslash escape character itself are escaped.
pub(crate) fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
