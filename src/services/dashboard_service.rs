use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::{AnalyticsSeries, Period},
        dto::response::DashboardStatsResponse,
    },
    repositories::DashboardRepository,
    services::analytics_client::{AnalyticsUpstream, ADVANCED_PATH, PREDICTIONS_PATH},
};

pub struct DashboardService {
    dashboard: Arc<dyn DashboardRepository>,
    upstream: Arc<dyn AnalyticsUpstream>,
}

impl DashboardService {
    pub fn new(dashboard: Arc<dyn DashboardRepository>, upstream: Arc<dyn AnalyticsUpstream>) -> Self {
        Self { dashboard, upstream }
    }

    pub async fn stats(&self) -> AppResult<DashboardStatsResponse> {
        let snapshot = self.dashboard.snapshot().await?;
        Ok(snapshot.into())
    }

    pub async fn analytics(&self, period: Period) -> AppResult<AnalyticsSeries> {
        self.dashboard.series(period).await
    }

    /// Passed through verbatim. Any upstream failure surfaces as 503.
    pub async fn advanced(&self) -> AppResult<serde_json::Value> {
        self.upstream.fetch(ADVANCED_PATH).await
    }

    pub async fn predictions(&self) -> AppResult<serde_json::Value> {
        self.upstream.fetch(PREDICTIONS_PATH).await
    }
}
