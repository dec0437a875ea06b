use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{NewUser, ProfileChanges, Role, User, UserFilter},
    repositories::like_pattern,
};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, full_name, avatar_url, is_active, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> AppResult<User>;
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn exists_with_username_or_email(&self, username: &str, email: &str) -> AppResult<bool>;
    /// One page of users, newest first, plus the total matching `filter`.
    async fn list(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)>;
    async fn update_profile(&self, id: i32, changes: ProfileChanges) -> AppResult<User>;
    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()>;
    async fn update_role(&self, id: i32, role: Role) -> AppResult<User>;
    async fn count_by_role(&self, role: Role) -> AppResult<i64>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

fn user_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User with id '{}' not found", id))
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    qb.push(" WHERE 1=1");

    if let Some(role) = filter.role {
        qb.push(" AND role = ").push_bind(role.as_str());
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (username ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR full_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, role, full_name) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            USER_COLUMNS
        );

        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.full_name)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn exists_with_username_or_email(&self, username: &str, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM users");
        push_filter(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let users = query
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }

    async fn update_profile(&self, id: i32, changes: ProfileChanges) -> AppResult<User> {
        let sql = format!(
            "UPDATE users SET full_name = COALESCE($1, full_name), \
             avatar_url = COALESCE($2, avatar_url), updated_at = NOW() \
             WHERE id = $3 RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(changes.full_name)
            .bind(changes.avatar_url)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    async fn update_role(&self, id: i32, role: Role) -> AppResult<User> {
        let sql = format!(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(role.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn count_by_role(&self, role: Role) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
