use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AccessControl, Identity, ADMIN_OR_MODERATOR},
    errors::AppError,
    models::dto::{
        request::{ActivityParams, RecordMetricRequest},
        response::{ActivitiesResponse, MetricResponse},
    },
};

#[get("/api/analytics/activities", wrap = "AccessControl::authenticated()")]
pub async fn activities(
    state: web::Data<Arc<AppState>>,
    identity: Identity,
    query: web::Query<ActivityParams>,
) -> Result<HttpResponse, AppError> {
    let activities = state
        .analytics_service
        .activities(&identity, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ActivitiesResponse { activities }))
}

#[post("/api/analytics/metrics", wrap = "AccessControl::roles(ADMIN_OR_MODERATOR)")]
pub async fn record_metric(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RecordMetricRequest>,
) -> Result<HttpResponse, AppError> {
    let metric = state
        .analytics_service
        .record_metric(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(MetricResponse { metric }))
}
