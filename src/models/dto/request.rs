use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{
    game::{GameSort, SortOrder},
    GameChanges, GameFilter, NewGame, Period, ProfileChanges, Role, UserFilter,
};

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 50),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must be alphanumeric with underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"), length(max = 100))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 100))]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub full_name: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileChanges {
            full_name: request.full_name.map(|s| s.trim().to_string()),
            avatar_url: request.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,

    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1, max = 1_000_000))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
        }
    }
}

/// Highest page number a listing accepts.
pub const MAX_PAGE: i64 = 1_000_000;

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserListParams {
    #[validate(range(min = 1, max = 1_000_000))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    pub role: Option<Role>,
    pub search: Option<String>,
}

impl UserListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn filter(&self) -> UserFilter {
        UserFilter {
            role: self.role,
            search: non_blank(self.search.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GameListParams {
    #[validate(range(min = 1, max = 1_000_000))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: GameSort,
    #[serde(default)]
    pub order: SortOrder,
}

impl GameListParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn filter(&self) -> GameFilter {
        GameFilter {
            category: non_blank(self.category.as_deref()),
            search: non_blank(self.search.as_deref()),
            sort: self.sort,
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGameRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(max = 200))]
    pub subtitle: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
    pub color: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[validate(range(min = 0, max = 100))]
    pub discount: Option<i32>,
    pub badge: Option<String>,
    pub logo: Option<String>,
    pub is_free: Option<bool>,
}

impl CreateGameRequest {
    pub fn into_new_game(self, created_by: i32) -> NewGame {
        NewGame {
            title: self.title.trim().to_string(),
            subtitle: self.subtitle,
            description: self.description,
            image_url: self.image_url,
            category: self.category,
            color: self.color,
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            badge: self.badge,
            logo: self.logo,
            is_free: self.is_free.unwrap_or(false),
            created_by,
        }
    }
}

/// Unknown keys are ignored, mirroring the allow-list of updatable columns.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGameRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 200))]
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub original_price: Option<f64>,
    #[validate(range(min = 0, max = 100))]
    pub discount: Option<i32>,
    pub badge: Option<String>,
    pub logo: Option<String>,
    pub is_free: Option<bool>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

impl From<UpdateGameRequest> for GameChanges {
    fn from(request: UpdateGameRequest) -> Self {
        GameChanges {
            title: request.title,
            subtitle: request.subtitle,
            description: request.description,
            image_url: request.image_url,
            category: request.category,
            color: request.color,
            price: request.price,
            original_price: request.original_price,
            discount: request.discount,
            badge: request.badge,
            logo: request.logo,
            is_free: request.is_free,
            rating: request.rating,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsParams {
    #[serde(default)]
    pub period: Period,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivityParams {
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<i64>,
}

impl ActivityParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordMetricRequest {
    #[validate(length(min = 1, max = 100, message = "Metric name is required"))]
    pub metric_name: String,
    pub metric_value: Option<f64>,
    pub metric_data: Option<serde_json::Value>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
