use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Metric, NewMetric, UserActivity},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn record_activity(
        &self,
        user_id: Option<i32>,
        activity_type: &str,
        data: serde_json::Value,
    ) -> AppResult<()>;
    /// Newest first. `None` lists every user's activity.
    async fn list_activities(&self, user_id: Option<i32>, limit: i64)
        -> AppResult<Vec<UserActivity>>;
    async fn record_metric(&self, metric: NewMetric) -> AppResult<Metric>;
}

pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

fn build_activity_query(user_id: Option<i32>, limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT * FROM user_activities WHERE 1=1");
    if let Some(user_id) = user_id {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(limit);
    qb
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn record_activity(
        &self,
        user_id: Option<i32>,
        activity_type: &str,
        data: serde_json::Value,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_activities (user_id, activity_type, activity_data) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(activity_type)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_activities(
        &self,
        user_id: Option<i32>,
        limit: i64,
    ) -> AppResult<Vec<UserActivity>> {
        let activities = build_activity_query(user_id, limit)
            .build_query_as::<UserActivity>()
            .fetch_all(&self.pool)
            .await?;
        Ok(activities)
    }

    async fn record_metric(&self, metric: NewMetric) -> AppResult<Metric> {
        let created = sqlx::query_as::<_, Metric>(
            "INSERT INTO analytics (metric_name, metric_value, metric_data) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(metric.metric_name)
        .bind(metric.metric_value)
        .bind(metric.metric_data)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}
