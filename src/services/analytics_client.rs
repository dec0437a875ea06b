use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};

pub const ADVANCED_PATH: &str = "/api/analytics/advanced";
pub const PREDICTIONS_PATH: &str = "/api/analytics/predictions";

/// The external analytics service, treated as a black box that returns JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsUpstream: Send + Sync {
    async fn fetch(&self, path: &str) -> AppResult<serde_json::Value>;
}

pub struct HttpAnalyticsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalyticsClient {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalyticsUpstream for HttpAnalyticsClient {
    async fn fetch(&self, path: &str) -> AppResult<serde_json::Value> {
        let url = self.url(path);

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::warn!("Analytics service request to {} failed: {}", url, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Analytics service {} responded with {}", url, status);
            return Err(AppError::UpstreamUnavailable(format!(
                "Analytics service responded with status {}",
                status.as_u16()
            )));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!(
                "Analytics service returned an unreadable body: {}",
                e
            ))
        })
    }
}
