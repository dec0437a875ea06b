use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use battlenet_api::{
    app_state::AppState,
    config::Config,
    handlers,
    middleware::{request_id, RequestIdMiddleware},
};

fn build_cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let bootstrap_admin = config.bootstrap_admin.clone();

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialise application: {}", e)))?;

    if let Some(admin) = bootstrap_admin {
        match state.auth_service.ensure_admin(&admin).await {
            Ok(true) => log::info!("Administrator account {} created", admin.username),
            Ok(false) => log::debug!("Administrator account already present"),
            Err(e) => log::error!("Failed to bootstrap administrator: {}", e),
        }
    }

    let state = Arc::new(state);
    let jwt_service = web::Data::from(state.jwt_service.clone());
    let allowed_origins = state.config.cors_allowed_origins.clone();

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(jwt_service.clone())
            .wrap(build_cors(&allowed_origins))
            .wrap(
                Logger::new(r#"%a "%r" %s %b "%{User-Agent}i" %T [%{request_id}xi]"#)
                    .custom_request_replace("request_id", |req| {
                        request_id(req).unwrap_or_default()
                    }),
            )
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
