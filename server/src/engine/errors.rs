// Error taxonomy for the rule engine

use super::game_state::GameState;

/// A tick that breaks one of the movement rules. These are expected outcomes
/// of a replay and are reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("invalid move")]
    InvalidMove,
    #[error("snake made a 180-degree turn")]
    ReverseMove,
    #[error("snake moved diagonal")]
    DiagonalMove,
    #[error("snake is out of bounds")]
    OutOfBounds,
}

/// A state that should be impossible after a legal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("fruit is out of bounds")]
    FruitOutOfBounds,
    #[error("snake is out of bounds")]
    SnakeOutOfBounds,
}

/// Replay stopped at the first illegal tick.
///
/// `state` already has the failing tick's position applied, while the snake's
/// velocity is still the last one that passed every check. Ticks after `tick`
/// were never applied.
#[derive(Debug, Clone, thiserror::Error)]
#[error("tick {tick}: {violation}")]
pub struct IllegalMove {
    pub tick: usize,
    #[source]
    pub violation: RuleViolation,
    pub state: GameState,
    pub fruit_found: bool,
}
