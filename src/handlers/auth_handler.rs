use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AccessControl, Identity},
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::UserResponse,
    },
};

#[post("/api/auth/register")]
pub async fn register(
    state: web::Data<Arc<AppState>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<Arc<AppState>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/auth/me", wrap = "AccessControl::authenticated()")]
pub async fn me(
    state: web::Data<Arc<AppState>>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    let user = state.auth_service.current_user(&identity).await?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
