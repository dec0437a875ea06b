use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Identity,
    errors::{AppError, AppResult},
    models::{
        domain::{Game, GameChanges},
        dto::{
            request::{CreateGameRequest, GameListParams, UpdateGameRequest},
            response::{GamePage, Pagination},
        },
    },
    repositories::GameRepository,
};

pub struct GameService {
    games: Arc<dyn GameRepository>,
}

impl GameService {
    pub fn new(games: Arc<dyn GameRepository>) -> Self {
        Self { games }
    }

    pub async fn list(&self, params: GameListParams) -> AppResult<GamePage> {
        params.validate()?;
        let pagination = params.pagination();

        let (games, total) = self
            .games
            .list(&params.filter(), pagination.offset(), pagination.limit())
            .await?;

        Ok(GamePage {
            games,
            pagination: Pagination::new(pagination.page(), pagination.limit(), total),
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<Game> {
        self.games
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }

    pub async fn create(&self, identity: &Identity, request: CreateGameRequest) -> AppResult<Game> {
        request.validate()?;

        let game = self
            .games
            .create(request.into_new_game(identity.user_id))
            .await?;

        log::info!("User {} created game {} ({})", identity.user_id, game.id, game.title);
        Ok(game)
    }

    pub async fn update(&self, id: i32, request: UpdateGameRequest) -> AppResult<Game> {
        request.validate()?;

        let changes = GameChanges::from(request);
        if changes.is_empty() {
            return Err(AppError::ValidationError(
                "No valid fields to update".to_string(),
            ));
        }

        self.games.update(id, changes).await
    }

    pub async fn delete(&self, identity: &Identity, id: i32) -> AppResult<()> {
        self.games.delete(id).await?;

        log::info!("User {} deleted game {}", identity.user_id, id);
        Ok(())
    }
}
