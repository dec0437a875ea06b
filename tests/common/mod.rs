#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};

use battlenet_api::{
    app_state::{AppState, Repositories},
    auth::hash_password,
    config::{Config, Environment},
    db::HealthProbe,
    errors::{AppError, AppResult},
    models::domain::{
        analytics::{ActivityCount, CategoryCount, Totals},
        game::{GameSort, SortOrder},
        AnalyticsSeries, DashboardSnapshot, Game, GameChanges, GameFilter, Metric, NewGame,
        NewMetric, NewUser, Period, ProfileChanges, Role, User, UserActivity, UserFilter,
    },
    repositories::{AnalyticsRepository, DashboardRepository, GameRepository, UserRepository},
    services::AnalyticsUpstream,
};

pub const TEST_SECRET: &str = "integration_test_secret_key";
pub const TEST_COST: u32 = 4;

pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        database_url: "postgres://localhost/battlenet_test".to_string(),
        run_migrations: false,
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 3000,
        jwt_secret: SecretString::from(TEST_SECRET.to_string()),
        jwt_expiration: Duration::days(7),
        bcrypt_cost: TEST_COST,
        analytics_service_url: "http://127.0.0.1:5000".to_string(),
        analytics_timeout_secs: 1,
        cors_allowed_origins: Vec::new(),
        bootstrap_admin: None,
    }
}

fn page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i32, User>>,
    next_id: Mutex<i32>,
    pub password_writes: Mutex<u32>,
}

impl InMemoryUserRepository {
    pub async fn insert(&self, user: User) {
        let mut next_id = self.next_id.lock().await;
        *next_id = (*next_id).max(user.id);
        self.users.write().await.insert(user.id, user);
    }

    pub async fn get(&self, id: i32) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn all(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    pub async fn set_active(&self, id: i32, is_active: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_active = is_active;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        if self
            .exists_with_username_or_email(&user.username, &user.email)
            .await?
        {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        let now = Utc::now();
        let created = User {
            id: *next_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            full_name: user.full_name,
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.users.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.get(id).await)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_with_username_or_email(&self, username: &str, email: &str) -> AppResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.username == username || u.email == email))
    }

    async fn list(
        &self,
        filter: &UserFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<User>, i64)> {
        let users = self.users.read().await;
        let mut items: Vec<User> = users
            .values()
            .filter(|u| filter.role.map_or(true, |role| u.role == role))
            .filter(|u| {
                filter.search.as_deref().map_or(true, |q| {
                    contains_ci(Some(u.username.as_str()), q)
                        || contains_ci(Some(u.email.as_str()), q)
                        || contains_ci(u.full_name.as_deref(), q)
                })
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = items.len() as i64;
        Ok((page(&items, offset, limit), total))
    }

    async fn update_profile(&self, id: i32, changes: ProfileChanges) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(full_name) = changes.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(avatar_url) = changes.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.password_hash = password_hash.to_string();
        *self.password_writes.lock().await += 1;
        Ok(())
    }

    async fn update_role(&self, id: i32, role: Role) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        user.role = role;
        Ok(user.clone())
    }

    async fn count_by_role(&self, role: Role) -> AppResult<i64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.role == role).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<i32, Game>>,
    next_id: Mutex<i32>,
}

impl InMemoryGameRepository {
    pub async fn all(&self) -> Vec<Game> {
        self.games.read().await.values().cloned().collect()
    }
}

fn sort_games(games: &mut [Game], sort: GameSort, order: SortOrder) {
    games.sort_by(|a, b| {
        let ordering = match sort {
            GameSort::Title => a.title.cmp(&b.title),
            GameSort::Price => a
                .price
                .unwrap_or_default()
                .total_cmp(&b.price.unwrap_or_default()),
            GameSort::Rating => a.rating.total_cmp(&b.rating),
            GameSort::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        let ordering = match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        ordering.then(a.id.cmp(&b.id))
    });
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn list(
        &self,
        filter: &GameFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Game>, i64)> {
        let games = self.games.read().await;
        let mut items: Vec<Game> = games
            .values()
            .filter(|g| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| g.category.as_deref() == Some(c))
            })
            .filter(|g| {
                filter.search.as_deref().map_or(true, |q| {
                    contains_ci(Some(g.title.as_str()), q) || contains_ci(g.description.as_deref(), q)
                })
            })
            .cloned()
            .collect();
        sort_games(&mut items, filter.sort, filter.order);

        let total = items.len() as i64;
        Ok((page(&items, offset, limit), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Game>> {
        Ok(self.games.read().await.get(&id).cloned())
    }

    async fn create(&self, game: NewGame) -> AppResult<Game> {
        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        let now = Utc::now();
        let created = Game {
            id: *next_id,
            title: game.title,
            subtitle: game.subtitle,
            description: Some(game.description),
            image_url: game.image_url,
            category: Some(game.category),
            color: game.color,
            price: game.price,
            original_price: game.original_price,
            discount: game.discount,
            badge: game.badge,
            logo: game.logo,
            is_free: game.is_free,
            rating: 0.0,
            downloads: 0,
            created_by: Some(game.created_by),
            created_at: now,
            updated_at: now,
        };

        self.games.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: GameChanges) -> AppResult<Game> {
        if changes.is_empty() {
            return Err(AppError::ValidationError(
                "No valid fields to update".to_string(),
            ));
        }

        let mut games = self.games.write().await;
        let game = games
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))?;

        if let Some(v) = changes.title {
            game.title = v;
        }
        if let Some(v) = changes.subtitle {
            game.subtitle = Some(v);
        }
        if let Some(v) = changes.description {
            game.description = Some(v);
        }
        if let Some(v) = changes.image_url {
            game.image_url = Some(v);
        }
        if let Some(v) = changes.category {
            game.category = Some(v);
        }
        if let Some(v) = changes.color {
            game.color = Some(v);
        }
        if let Some(v) = changes.price {
            game.price = Some(v);
        }
        if let Some(v) = changes.original_price {
            game.original_price = Some(v);
        }
        if let Some(v) = changes.discount {
            game.discount = Some(v);
        }
        if let Some(v) = changes.badge {
            game.badge = Some(v);
        }
        if let Some(v) = changes.logo {
            game.logo = Some(v);
        }
        if let Some(v) = changes.is_free {
            game.is_free = v;
        }
        if let Some(v) = changes.rating {
            game.rating = v;
        }
        game.updated_at = Utc::now();

        Ok(game.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.games
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryAnalyticsRepository {
    activities: RwLock<Vec<UserActivity>>,
    metrics: RwLock<Vec<Metric>>,
}

impl InMemoryAnalyticsRepository {
    pub async fn activities(&self) -> Vec<UserActivity> {
        self.activities.read().await.clone()
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryAnalyticsRepository {
    async fn record_activity(
        &self,
        user_id: Option<i32>,
        activity_type: &str,
        data: serde_json::Value,
    ) -> AppResult<()> {
        let mut activities = self.activities.write().await;
        let id = activities.len() as i32 + 1;
        activities.push(UserActivity {
            id,
            user_id,
            activity_type: activity_type.to_string(),
            activity_data: Some(data),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_activities(
        &self,
        user_id: Option<i32>,
        limit: i64,
    ) -> AppResult<Vec<UserActivity>> {
        let activities = self.activities.read().await;
        Ok(activities
            .iter()
            .rev()
            .filter(|a| user_id.map_or(true, |id| a.user_id == Some(id)))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn record_metric(&self, metric: NewMetric) -> AppResult<Metric> {
        let mut metrics = self.metrics.write().await;
        let now = Utc::now();
        let created = Metric {
            id: metrics.len() as i32 + 1,
            metric_name: metric.metric_name,
            metric_value: metric.metric_value,
            metric_data: Some(metric.metric_data),
            date_recorded: now.date_naive(),
            created_at: now,
        };
        metrics.push(created.clone());
        Ok(created)
    }
}

/// Derives dashboard figures from the in-memory user and game stores.
pub struct InMemoryDashboardRepository {
    users: Arc<InMemoryUserRepository>,
    games: Arc<InMemoryGameRepository>,
}

#[async_trait]
impl DashboardRepository for InMemoryDashboardRepository {
    async fn snapshot(&self) -> AppResult<DashboardSnapshot> {
        let mut games = self.games.all().await;
        let mut users = self.users.all().await;

        let paid: Vec<&Game> = games.iter().filter(|g| !g.is_free).collect();
        let totals = Totals {
            total_games: games.len() as i64,
            total_users: users.len() as i64,
            total_revenue: paid.iter().filter_map(|g| g.price).sum(),
            free_games: (games.len() - paid.len()) as i64,
            paid_games: paid.len() as i64,
        };

        let mut per_category: HashMap<Option<String>, i64> = HashMap::new();
        for game in &games {
            *per_category.entry(game.category.clone()).or_default() += 1;
        }
        let categories = per_category
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();

        games.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        games.truncate(5);
        users.truncate(5);

        Ok(DashboardSnapshot {
            totals,
            categories,
            recent_games: games,
            recent_users: users,
            activities: Vec::<ActivityCount>::new(),
        })
    }

    async fn series(&self, _period: Period) -> AppResult<AnalyticsSeries> {
        Ok(AnalyticsSeries::default())
    }
}

/// Upstream analytics stand-in: returns the canned body, or fails when none is set.
#[derive(Default)]
pub struct StubUpstream {
    pub body: Option<serde_json::Value>,
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl AnalyticsUpstream for StubUpstream {
    async fn fetch(&self, path: &str) -> AppResult<serde_json::Value> {
        self.calls.lock().await.push(path.to_string());
        self.body.clone().ok_or_else(|| {
            AppError::UpstreamUnavailable("Analytics service responded with status 502".to_string())
        })
    }
}

pub struct StubHealth {
    pub healthy: bool,
}

#[async_trait]
impl HealthProbe for StubHealth {
    async fn health_check(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
    }
}

pub struct TestContext {
    pub state: Arc<AppState>,
    pub users: Arc<InMemoryUserRepository>,
    pub games: Arc<InMemoryGameRepository>,
    pub analytics: Arc<InMemoryAnalyticsRepository>,
    pub upstream: Arc<StubUpstream>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::build(StubUpstream::default(), true)
    }

    pub fn with_upstream(body: Option<serde_json::Value>) -> Self {
        Self::build(
            StubUpstream {
                body,
                ..Default::default()
            },
            true,
        )
    }

    pub fn with_unhealthy_store() -> Self {
        Self::build(StubUpstream::default(), false)
    }

    fn build(upstream: StubUpstream, healthy: bool) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let games = Arc::new(InMemoryGameRepository::default());
        let analytics = Arc::new(InMemoryAnalyticsRepository::default());
        let upstream = Arc::new(upstream);

        let repositories = Repositories {
            users: users.clone(),
            games: games.clone(),
            dashboard: Arc::new(InMemoryDashboardRepository {
                users: users.clone(),
                games: games.clone(),
            }),
            analytics: analytics.clone(),
        };

        let state = AppState::from_parts(
            test_config(),
            repositories,
            upstream.clone(),
            Arc::new(StubHealth { healthy }),
        );

        Self {
            state: Arc::new(state),
            users,
            games,
            analytics,
            upstream,
        }
    }

    pub async fn seed_user(&self, id: i32, username: &str, role: Role, password: &str) -> User {
        let now = Utc::now();
        let user = User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: hash_password(password, TEST_COST).await.unwrap(),
            role,
            full_name: None,
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.clone()).await;
        user
    }

    pub fn token_for(&self, user_id: i32, role: Role) -> String {
        self.state.jwt_service.issue(user_id, role).unwrap()
    }

    pub fn bearer(&self, user_id: i32, role: Role) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token_for(user_id, role)))
    }
}

/// Builds the full route table over a [`TestContext`].
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state.clone()))
                .app_data(actix_web::web::Data::from($ctx.state.jwt_service.clone()))
                .wrap(battlenet_api::middleware::RequestIdMiddleware)
                .configure(battlenet_api::handlers::configure),
        )
        .await
    };
}
