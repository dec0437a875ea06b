use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Game, GameChanges, GameFilter, NewGame},
    repositories::like_pattern,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn list(
        &self,
        filter: &GameFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Game>, i64)>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Game>>;
    async fn create(&self, game: NewGame) -> AppResult<Game>;
    async fn update(&self, id: i32, changes: GameChanges) -> AppResult<Game>;
    async fn delete(&self, id: i32) -> AppResult<()>;
}

pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

fn game_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Game with id '{}' not found", id))
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &GameFilter) {
    qb.push(" WHERE 1=1");

    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

macro_rules! set_if_present {
    ($fields:expr, $column:literal, $value:expr) => {
        if let Some(value) = $value {
            $fields
                .push(concat!($column, " = "))
                .push_bind_unseparated(value);
        }
    };
}

fn build_update(id: i32, changes: GameChanges) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE games SET ");
    let mut fields = qb.separated(", ");

    set_if_present!(fields, "title", changes.title);
    set_if_present!(fields, "subtitle", changes.subtitle);
    set_if_present!(fields, "description", changes.description);
    set_if_present!(fields, "image_url", changes.image_url);
    set_if_present!(fields, "category", changes.category);
    set_if_present!(fields, "color", changes.color);
    set_if_present!(fields, "price", changes.price);
    set_if_present!(fields, "original_price", changes.original_price);
    set_if_present!(fields, "discount", changes.discount);
    set_if_present!(fields, "badge", changes.badge);
    set_if_present!(fields, "logo", changes.logo);
    set_if_present!(fields, "is_free", changes.is_free);
    set_if_present!(fields, "rating", changes.rating);
    fields.push("updated_at = NOW()");

    qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    qb
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn list(
        &self,
        filter: &GameFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Game>, i64)> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM games");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT * FROM games");
        push_filter(&mut query, filter);
        // Column and direction come from closed enums, never from raw input.
        query
            .push(format!(
                " ORDER BY {} {}, id ASC LIMIT ",
                filter.sort.column(),
                filter.order.keyword()
            ))
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let games = query
            .build_query_as::<Game>()
            .fetch_all(&self.pool)
            .await?;

        Ok((games, total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Game>> {
        let game = sqlx::query_as::<_, Game>("SELECT * FROM games WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(game)
    }

    async fn create(&self, game: NewGame) -> AppResult<Game> {
        let created = sqlx::query_as::<_, Game>(
            "INSERT INTO games (title, subtitle, description, image_url, category, color, \
             price, original_price, discount, badge, logo, is_free, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(game.title)
        .bind(game.subtitle)
        .bind(game.description)
        .bind(game.image_url)
        .bind(game.category)
        .bind(game.color)
        .bind(game.price)
        .bind(game.original_price)
        .bind(game.discount)
        .bind(game.badge)
        .bind(game.logo)
        .bind(game.is_free)
        .bind(game.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i32, changes: GameChanges) -> AppResult<Game> {
        if changes.is_empty() {
            return Err(AppError::ValidationError(
                "No valid fields to update".to_string(),
            ));
        }

        build_update(id, changes)
            .build_query_as::<Game>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| game_not_found(id))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(game_not_found(id));
        }

        Ok(())
    }
}
