pub mod analytics;
pub mod game;
pub mod user;
pub use analytics::{AnalyticsSeries, DashboardSnapshot, Metric, NewMetric, Period, UserActivity};
pub use game::{Game, GameChanges, GameFilter, NewGame};
pub use user::{NewUser, ProfileChanges, Role, User, UserFilter};
