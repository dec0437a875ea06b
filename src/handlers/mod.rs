use actix_web::web;

use crate::errors::AppError;

pub mod analytics_handler;
pub mod auth_handler;
pub mod dashboard_handler;
pub mod game_handler;
pub mod health_handler;
pub mod user_handler;

/// Registers every route plus extractor configs that turn malformed input
/// into the structured error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|_err, _req| {
        AppError::NotFound("Resource not found".to_string()).into()
    }))
    .service(health_handler::health_check)
    .service(health_handler::health_check_ready)
    .service(auth_handler::register)
    .service(auth_handler::login)
    .service(auth_handler::me)
    .service(user_handler::list_users)
    .service(user_handler::get_user)
    .service(user_handler::update_profile)
    .service(user_handler::change_password)
    .service(user_handler::update_role)
    .service(game_handler::list_games)
    .service(game_handler::get_game)
    .service(game_handler::create_game)
    .service(game_handler::update_game)
    .service(game_handler::delete_game)
    .service(dashboard_handler::stats)
    .service(dashboard_handler::analytics)
    .service(dashboard_handler::advanced)
    .service(dashboard_handler::predictions)
    .service(analytics_handler::activities)
    .service(analytics_handler::record_metric);
}
