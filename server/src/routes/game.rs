use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
};
use serde::Deserialize;

use crate::{
    engine::{GameEngine, GameState, MoveRequest},
    errors::{ApiError, ApiResult},
    state::AppState,
};

/// Query parameters for /new
#[derive(Debug, Deserialize)]
pub struct NewGameParams {
    pub w: Option<String>,
    pub h: Option<String>,
}

impl NewGameParams {
    fn dimensions(&self) -> ApiResult<(i32, i32)> {
        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|s| s.parse::<i32>().ok())
                .ok_or(ApiError::InvalidNumber)
        };

        Ok((parse(&self.w)?, parse(&self.h)?))
    }
}

/// GET /new?w=<width>&h=<height>
///
/// Creates a fresh board. Nothing is stored server side; the caller keeps the
/// returned state and sends it back with every /validate call.
pub async fn new_game(
    State(state): State<AppState>,
    params: Result<Query<NewGameParams>, QueryRejection>,
) -> ApiResult<Json<GameState>> {
    let Query(params) = params.map_err(|_| ApiError::InvalidNumber)?;
    let (width, height) = params.dimensions()?;

    if !state.engine.rules().dimensions_valid(width, height) {
        return Err(ApiError::InvalidBoardDimensions);
    }

    let game = state.engine.new_game(
        width,
        height,
        state.game_ids.next_id(),
        &mut rand::thread_rng(),
    );
    game.check_invariants()?;

    Ok(Json(game))
}

/// POST /validate
///
/// Replays the submitted ticks against the submitted state. Responds 200 with
/// the next state only when the fruit was reached; a legal replay that missed
/// the fruit is a 404 carrying the advanced state. The body is read as JSON
/// whatever Content-Type the caller sent.
pub async fn validate(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<GameState>> {
    let request: MoveRequest = serde_json::from_slice(&body?)?;

    if !request.state.game_id.is_well_formed() {
        return Err(ApiError::InvalidGameId);
    }

    if request.ticks.is_empty() {
        return Err(ApiError::SnakeNotMoving);
    }

    tracing::debug!(
        game_id = %request.state.game_id,
        ticks = request.ticks.len(),
        "Validating moves"
    );

    let replay = state.engine.play(request, &mut rand::thread_rng())?;
    replay.state.check_invariants()?;

    if !replay.fruit_found {
        return Err(ApiError::FruitNotFound(Box::new(replay.state)));
    }

    Ok(Json(replay.state))
}
