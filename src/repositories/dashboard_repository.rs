use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{
        analytics::{ActivityCount, CategoryCount, DailyCount, DailyRevenue, TopGame, Totals},
        AnalyticsSeries, DashboardSnapshot, Game, Period, User,
    },
};

const RECENT_LIMIT: i64 = 5;
const TOP_GAMES_LIMIT: i64 = 10;

/// Read-only aggregates over the catalog and user base.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn snapshot(&self) -> AppResult<DashboardSnapshot>;
    async fn series(&self, period: Period) -> AppResult<AnalyticsSeries>;
}

pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    async fn totals(&self) -> AppResult<Totals> {
        let totals = sqlx::query_as::<_, Totals>(
            "SELECT \
               (SELECT COUNT(*) FROM games) AS total_games, \
               (SELECT COUNT(*) FROM users) AS total_users, \
               (SELECT COALESCE(SUM(price), 0)::float8 FROM games WHERE is_free = false) AS total_revenue, \
               (SELECT COUNT(*) FROM games WHERE is_free = true) AS free_games, \
               (SELECT COUNT(*) FROM games WHERE is_free = false) AS paid_games",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }

    async fn daily_counts(&self, table: &'static str, period: Period) -> AppResult<Vec<DailyCount>> {
        let sql = format!(
            "SELECT DATE(created_at) AS date, COUNT(*) AS count FROM {} \
             WHERE created_at >= NOW() - $1::interval \
             GROUP BY DATE(created_at) ORDER BY date ASC",
            table
        );

        let rows = sqlx::query_as::<_, DailyCount>(&sql)
            .bind(period.interval())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn snapshot(&self) -> AppResult<DashboardSnapshot> {
        let totals = self.totals().await?;

        let categories = sqlx::query_as::<_, CategoryCount>(
            "SELECT category, COUNT(*) AS count FROM games GROUP BY category ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let recent_games = sqlx::query_as::<_, Game>(
            "SELECT * FROM games ORDER BY created_at DESC LIMIT $1",
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let recent_users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role, full_name, avatar_url, \
             is_active, created_at, updated_at FROM users ORDER BY created_at DESC LIMIT $1",
        )
        .bind(RECENT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let activities = sqlx::query_as::<_, ActivityCount>(
            "SELECT activity_type, COUNT(*) AS count FROM user_activities \
             WHERE created_at >= NOW() - INTERVAL '24 hours' GROUP BY activity_type",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardSnapshot {
            totals,
            categories,
            recent_games,
            recent_users,
            activities,
        })
    }

    async fn series(&self, period: Period) -> AppResult<AnalyticsSeries> {
        let games_over_time = self.daily_counts("games", period).await?;
        let users_over_time = self.daily_counts("users", period).await?;

        let top_games = sqlx::query_as::<_, TopGame>(
            "SELECT title, downloads, rating FROM games ORDER BY downloads DESC LIMIT $1",
        )
        .bind(TOP_GAMES_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let revenue_over_time = sqlx::query_as::<_, DailyRevenue>(
            "SELECT DATE(created_at) AS date, COALESCE(SUM(price), 0)::float8 AS revenue \
             FROM games WHERE created_at >= NOW() - $1::interval AND is_free = false \
             GROUP BY DATE(created_at) ORDER BY date ASC",
        )
        .bind(period.interval())
        .fetch_all(&self.pool)
        .await?;

        Ok(AnalyticsSeries {
            games_over_time,
            users_over_time,
            top_games,
            revenue_over_time,
        })
    }
}
