use std::{sync::Arc, time::Duration};

use crate::{
    auth::JwtService,
    config::Config,
    db::{Database, HealthProbe},
    errors::AppResult,
    repositories::{
        AnalyticsRepository, DashboardRepository, GameRepository, PgAnalyticsRepository,
        PgDashboardRepository, PgGameRepository, PgUserRepository, UserRepository,
    },
    services::{
        AnalyticsService, AnalyticsUpstream, AuthService, DashboardService, GameService,
        HttpAnalyticsClient, UserService,
    },
};

/// Storage backends the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub games: Arc<dyn GameRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub game_service: Arc<GameService>,
    pub dashboard_service: Arc<DashboardService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub jwt_service: Arc<JwtService>,
    pub health: Arc<dyn HealthProbe>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        if config.run_migrations {
            db.migrate().await?;
        }

        let repositories = Repositories {
            users: Arc::new(PgUserRepository::new(&db)),
            games: Arc::new(PgGameRepository::new(&db)),
            dashboard: Arc::new(PgDashboardRepository::new(&db)),
            analytics: Arc::new(PgAnalyticsRepository::new(&db)),
        };

        let upstream = Arc::new(HttpAnalyticsClient::new(
            &config.analytics_service_url,
            Duration::from_secs(config.analytics_timeout_secs),
        )?);

        Ok(Self::from_parts(config, repositories, upstream, Arc::new(db)))
    }

    pub fn from_parts(
        config: Config,
        repositories: Repositories,
        upstream: Arc<dyn AnalyticsUpstream>,
        health: Arc<dyn HealthProbe>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_expiration));

        let auth_service = Arc::new(AuthService::new(
            repositories.users.clone(),
            repositories.analytics.clone(),
            jwt_service.clone(),
            config.bcrypt_cost,
        ));
        let user_service = Arc::new(UserService::new(
            repositories.users.clone(),
            config.bcrypt_cost,
        ));
        let game_service = Arc::new(GameService::new(repositories.games.clone()));
        let dashboard_service = Arc::new(DashboardService::new(
            repositories.dashboard.clone(),
            upstream,
        ));
        let analytics_service = Arc::new(AnalyticsService::new(repositories.analytics));

        Self {
            auth_service,
            user_service,
            game_service,
            dashboard_service,
            analytics_service,
            jwt_service,
            health,
            config: Arc::new(config),
        }
    }
}
