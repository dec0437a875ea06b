use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    analytics::{ActivityCount, CategoryCount, Totals},
    DashboardSnapshot, Game, Metric, Role, User, UserActivity,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
            avatar_url: user.avatar_url,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<UserDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct GamePage {
    pub games: Vec<Game>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game: Game,
}

/// Slimmed user row for the dashboard's "recent users" panel.
#[derive(Debug, Clone, Serialize)]
pub struct RecentUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for RecentUser {
    fn from(user: User) -> Self {
        RecentUser {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub stats: Totals,
    pub categories: Vec<CategoryCount>,
    pub recent_games: Vec<Game>,
    pub recent_users: Vec<RecentUser>,
    pub activities: Vec<ActivityCount>,
}

impl From<DashboardSnapshot> for DashboardStatsResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        DashboardStatsResponse {
            stats: snapshot.totals,
            categories: snapshot.categories,
            recent_games: snapshot.recent_games,
            recent_users: snapshot
                .recent_users
                .into_iter()
                .map(RecentUser::from)
                .collect(),
            activities: snapshot.activities,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<UserActivity>,
}

#[derive(Debug, Serialize)]
pub struct MetricResponse {
    pub metric: Metric,
}
