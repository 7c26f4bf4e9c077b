use std::sync::Arc;

use tokio::sync::Mutex;

use crate::games::board::GameEngine;

/// The whole game behind one lock. Handlers take it for the full duration
/// of an engine call and never await while holding it.
pub type SharedGame = Arc<Mutex<GameEngine>>;

#[derive(Clone)]
pub struct AppState {
    pub game: SharedGame,
}

impl AppState {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            game: Arc::new(Mutex::new(engine)),
        }
    }
}
