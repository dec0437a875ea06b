use std::sync::Arc;

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AccessControl, Identity, ADMIN_ONLY, ADMIN_OR_MODERATOR},
    errors::AppError,
    models::dto::{
        request::{CreateGameRequest, GameListParams, UpdateGameRequest},
        response::{GameResponse, MessageResponse},
    },
};

#[get("/api/games")]
pub async fn list_games(
    state: web::Data<Arc<AppState>>,
    query: web::Query<GameListParams>,
) -> Result<HttpResponse, AppError> {
    let page = state.game_service.list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/api/games/{id}")]
pub async fn get_game(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let game = state.game_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(GameResponse { game }))
}

#[post("/api/games", wrap = "AccessControl::roles(ADMIN_OR_MODERATOR)")]
pub async fn create_game(
    state: web::Data<Arc<AppState>>,
    identity: Identity,
    request: web::Json<CreateGameRequest>,
) -> Result<HttpResponse, AppError> {
    let game = state
        .game_service
        .create(&identity, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(GameResponse { game }))
}

#[put("/api/games/{id}", wrap = "AccessControl::roles(ADMIN_OR_MODERATOR)")]
pub async fn update_game(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    request: web::Json<UpdateGameRequest>,
) -> Result<HttpResponse, AppError> {
    let game = state
        .game_service
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GameResponse { game }))
}

#[delete("/api/games/{id}", wrap = "AccessControl::roles(ADMIN_ONLY)")]
pub async fn delete_game(
    state: web::Data<Arc<AppState>>,
    path: web::Path<i32>,
    identity: Identity,
) -> Result<HttpResponse, AppError> {
    state
        .game_service
        .delete(&identity, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Game deleted successfully")))
}
