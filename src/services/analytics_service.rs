use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Identity,
    errors::AppResult,
    models::{
        domain::{Metric, NewMetric, UserActivity},
        dto::request::{ActivityParams, RecordMetricRequest},
    },
    repositories::AnalyticsRepository,
};

pub struct AnalyticsService {
    analytics: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(analytics: Arc<dyn AnalyticsRepository>) -> Self {
        Self { analytics }
    }

    /// Administrators see every user's activity, everyone else only their own.
    pub async fn activities(
        &self,
        identity: &Identity,
        params: ActivityParams,
    ) -> AppResult<Vec<UserActivity>> {
        params.validate()?;

        let scope = if identity.is_admin() {
            None
        } else {
            Some(identity.user_id)
        };

        self.analytics.list_activities(scope, params.limit()).await
    }

    pub async fn record_metric(&self, request: RecordMetricRequest) -> AppResult<Metric> {
        request.validate()?;

        self.analytics
            .record_metric(NewMetric {
                metric_name: request.metric_name.trim().to_string(),
                metric_value: request.metric_value,
                metric_data: request
                    .metric_data
                    .unwrap_or_else(|| serde_json::json!({})),
            })
            .await
    }
}
