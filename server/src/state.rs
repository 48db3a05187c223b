use std::sync::Arc;

use crate::{
    config::Config,
    engine::{GameIdSource, StandardEngine},
};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<StandardEngine>,
    pub game_ids: Arc<GameIdSource>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let rules = config.rules();
        tracing::info!(?rules, "Loaded game rules");

        Self {
            engine: Arc::new(StandardEngine::new(rules)),
            game_ids: Arc::new(GameIdSource::new()),
            max_body_bytes: config.max_body_bytes,
        }
    }
}
