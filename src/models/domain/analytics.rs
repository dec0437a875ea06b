use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Game, User};

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct UserActivity {
    pub id: i32,
    pub user_id: Option<i32>,
    pub activity_type: String,
    pub activity_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Metric {
    pub id: i32,
    pub metric_name: String,
    pub metric_value: Option<f64>,
    pub metric_data: Option<serde_json::Value>,
    pub date_recorded: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewMetric {
    pub metric_name: String,
    pub metric_value: Option<f64>,
    pub metric_data: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct ActivityCount {
    pub activity_type: String,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, FromRow)]
pub struct TopGame {
    pub title: String,
    pub downloads: i32,
    pub rating: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_games: i64,
    pub total_users: i64,
    pub total_revenue: f64,
    pub free_games: i64,
    pub paid_games: i64,
}

/// Everything the dashboard landing page needs, fetched in one pass.
#[derive(Clone, Debug, Default)]
pub struct DashboardSnapshot {
    pub totals: Totals,
    pub categories: Vec<CategoryCount>,
    pub recent_games: Vec<Game>,
    pub recent_users: Vec<User>,
    pub activities: Vec<ActivityCount>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSeries {
    pub games_over_time: Vec<DailyCount>,
    pub users_over_time: Vec<DailyCount>,
    pub top_games: Vec<TopGame>,
    pub revenue_over_time: Vec<DailyRevenue>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "1y")]
    Year,
}

impl Period {
    /// Postgres interval literal, bound as a parameter and cast with `::interval`.
    pub fn interval(&self) -> &'static str {
        match self {
            Period::Week => "7 days",
            Period::Month => "30 days",
            Period::Year => "1 year",
        }
    }
}
