// Game state representation for the snake validator
//
// Everything here round-trips through the caller between requests, so the serde
// field names are part of the wire contract.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::InvariantViolation;

// A single cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves one step along `velocity`. Saturates instead of overflowing, since
    /// ticks are applied before their magnitude has been checked.
    pub fn step(&self, velocity: Velocity) -> Position {
        Position {
            x: self.x.saturating_add(velocity.vel_x),
            y: self.y.saturating_add(velocity.vel_y),
        }
    }
}

// A single-step direction, each component expected in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Velocity {
    #[serde(default)]
    pub vel_x: i32,
    #[serde(default)]
    pub vel_y: i32,
}

impl Velocity {
    pub const RIGHT: Velocity = Velocity { vel_x: 1, vel_y: 0 };

    pub fn new(vel_x: i32, vel_y: i32) -> Self {
        Self { vel_x, vel_y }
    }
}

/// One proposed step submitted by the caller.
pub type Tick = Velocity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fruit {
    pub x: i32,
    pub y: i32,
}

impl Fruit {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

impl From<Position> for Fruit {
    fn from(pos: Position) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

// The snake is a single head cell plus the velocity it last committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snake {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub vel_x: i32,
    #[serde(default)]
    pub vel_y: i32,
}

impl Snake {
    /// A snake at the origin heading along `velocity`.
    pub fn new(velocity: Velocity) -> Self {
        Self {
            x: 0,
            y: 0,
            vel_x: velocity.vel_x,
            vel_y: velocity.vel_y,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.vel_x, self.vel_y)
    }

    pub fn move_to(&mut self, pos: Position) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn turn(&mut self, velocity: Velocity) {
        self.vel_x = velocity.vel_x;
        self.vel_y = velocity.vel_y;
    }
}

/// Opaque per-game identifier. Issued as the decimal Unix time in nanoseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Only non-empty strings of ASCII digits are accepted back from callers.
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    pub fn cells(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }
}

// Complete game state, owned by the caller between requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: GameId,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub score: u32,
    pub fruit: Fruit,
    pub snake: Snake,
}

impl GameState {
    pub fn board(&self) -> Board {
        Board::new(self.width, self.height)
    }

    /// Post-condition for any state handed back to a caller.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let board = self.board();
        if !board.contains(self.fruit.position()) {
            return Err(InvariantViolation::FruitOutOfBounds);
        }
        if !board.contains(self.snake.position()) {
            return Err(InvariantViolation::SnakeOutOfBounds);
        }
        Ok(())
    }
}

// Body of a validate call: the full state plus the ticks to replay on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(flatten)]
    pub state: GameState,
    #[serde(default)]
    pub ticks: Vec<Tick>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState {
            game_id: GameId::new("123"),
            width: 10,
            height: 10,
            score: 0,
            fruit: Fruit { x: 3, y: 3 },
            snake: Snake {
                x: 0,
                y: 0,
                vel_x: 1,
                vel_y: 0,
            },
        }
    }

    #[test]
    fn test_position_step() {
        let pos = Position::new(5, 5);

        assert_eq!(pos.step(Velocity::new(1, 0)), Position::new(6, 5));
        assert_eq!(pos.step(Velocity::new(0, -1)), Position::new(5, 4));
        assert_eq!(pos.step(Velocity::new(-1, 0)), Position::new(4, 5));
    }

    #[test]
    fn test_position_step_saturates() {
        let pos = Position::new(i32::MAX, 0);
        assert_eq!(pos.step(Velocity::new(5, 0)), Position::new(i32::MAX, 0));
    }

    #[test]
    fn test_new_snake_starts_at_origin() {
        let snake = Snake::new(Velocity::RIGHT);

        assert_eq!(snake.position(), Position::new(0, 0));
        assert_eq!(snake.velocity(), Velocity::new(1, 0));
    }

    #[test]
    fn test_board_contains() {
        let board = Board::new(10, 10);

        assert!(board.contains(Position::new(5, 5)));
        assert!(board.contains(Position::new(0, 9)));
        assert!(!board.contains(Position::new(10, 0)));
        assert!(!board.contains(Position::new(-5, -5)));
    }

    #[test]
    fn test_game_id_shape() {
        assert!(GameId::new("111111").is_well_formed());
        assert!(!GameId::new("").is_well_formed());
        assert!(!GameId::new("SELECT * FROM games;").is_well_formed());
        assert!(!GameId::new("<script>alert('XSS')</script>").is_well_formed());
        assert!(!GameId::new("-12").is_well_formed());
    }

    #[test]
    fn test_check_invariants() {
        let mut state = sample_state();
        assert_eq!(state.check_invariants(), Ok(()));

        state.fruit = Fruit { x: 11, y: 11 };
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::FruitOutOfBounds)
        );

        state.fruit = Fruit { x: 5, y: 5 };
        state.snake.x = -1;
        assert_eq!(
            state.check_invariants(),
            Err(InvariantViolation::SnakeOutOfBounds)
        );
    }

    #[test]
    fn test_move_request_wire_format() {
        let json = serde_json::json!({
            "gameId": "123",
            "width": 10,
            "height": 10,
            "score": 0,
            "fruit": { "x": 3, "y": 3 },
            "snake": { "x": 0, "y": 0, "velX": 1, "velY": 0 },
            "ticks": [{ "velX": 1, "velY": 0 }, { "velX": 0, "velY": 1 }]
        });

        let request: MoveRequest = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(request.state, sample_state());
        assert_eq!(request.ticks, vec![Velocity::new(1, 0), Velocity::new(0, 1)]);

        assert_eq!(serde_json::to_value(&request).unwrap(), json);
    }

    #[test]
    fn test_move_request_optional_fields() {
        let json = serde_json::json!({
            "gameId": "123",
            "width": 10,
            "height": 10,
            "fruit": { "x": 3, "y": 3 },
            "snake": { "x": 0, "y": 0 }
        });

        let request: MoveRequest = serde_json::from_value(json).unwrap();
        assert!(request.ticks.is_empty());
        assert_eq!(request.state.score, 0);
        assert_eq!(request.state.snake.velocity(), Velocity::new(0, 0));
    }
}
