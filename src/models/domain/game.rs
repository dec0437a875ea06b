use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i32,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    pub badge: Option<String>,
    pub logo: Option<String>,
    pub is_free: bool,
    pub rating: f64,
    pub downloads: i32,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct NewGame {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    pub category: String,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    pub badge: Option<String>,
    pub logo: Option<String>,
    pub is_free: bool,
    pub created_by: i32,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameChanges {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    pub badge: Option<String>,
    pub logo: Option<String>,
    pub is_free: Option<bool>,
    pub rating: Option<f64>,
}

impl GameChanges {
    pub fn is_empty(&self) -> bool {
        *self == GameChanges::default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameSort {
    Title,
    Price,
    Rating,
    #[default]
    CreatedAt,
}

impl GameSort {
    pub fn column(&self) -> &'static str {
        match self {
            GameSort::Title => "title",
            GameSort::Price => "price",
            GameSort::Rating => "rating",
            GameSort::CreatedAt => "created_at",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GameFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: GameSort,
    pub order: SortOrder,
}
