use std::sync::Arc;

use actix_web::{get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AccessControl, Identity, ADMIN_ONLY},
    errors::AppError,
    models::dto::{
        request::{ChangePasswordRequest, UpdateProfileRequest, UpdateRoleRequest, UserListParams},
        response::UserResponse,
    },
};

#[get("/api/users", wrap = "AccessControl::authenticated()")]
pub async fn list_users(
    state: web::Data<Arc<AppState>>,
    query: web::Query<UserListParams>,
) -> Result<HttpResponse, AppError> {
    let page = state.user_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/api/users/{id}", wrap = "AccessControl::owner_or_admin(\"id\")")]
pub async fn get_user(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

#[put("/api/users/{id}", wrap = "AccessControl::owner_or_admin(\"id\")")]
pub async fn update_profile(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .update_profile(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Profile updated successfully",
        "user": user
    })))
}

#[put("/api/users/{id}/password", wrap = "AccessControl::owner_or_admin(\"id\")")]
pub async fn change_password(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    identity: Identity,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .user_service
        .change_password(&identity, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[put("/api/users/{id}/role", wrap = "AccessControl::roles(ADMIN_ONLY)")]
pub async fn update_role(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    identity: Identity,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .update_role(&identity, path.into_inner(), request.into_inner().role)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User role updated successfully",
        "user": user
    })))
}
