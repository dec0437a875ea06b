use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AccessControl, errors::AppError,
    models::dto::request::AnalyticsParams,
};

#[get("/api/dashboard/stats", wrap = "AccessControl::authenticated()")]
pub async fn stats(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let stats = state.dashboard_service.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/api/dashboard/analytics", wrap = "AccessControl::authenticated()")]
pub async fn analytics(
    state: web::Data<Arc<AppState>>,
    query: web::Query<AnalyticsParams>,
) -> Result<HttpResponse, AppError> {
    let series = state.dashboard_service.analytics(query.period).await?;
    Ok(HttpResponse::Ok().json(series))
}

#[get("/api/dashboard/analytics/advanced", wrap = "AccessControl::authenticated()")]
pub async fn advanced(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let body = state.dashboard_service.advanced().await?;
    Ok(HttpResponse::Ok().json(body))
}

#[get("/api/dashboard/analytics/predictions", wrap = "AccessControl::authenticated()")]
pub async fn predictions(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let body = state.dashboard_service.predictions().await?;
    Ok(HttpResponse::Ok().json(body))
}
