// Snake Game Engine
// Creates boards and replays caller-supplied ticks against the movement rules

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

pub mod display;
pub mod errors;
pub mod game_state;
pub mod rules;


pub use errors::{IllegalMove, InvariantViolation, RuleViolation};
pub use game_state::{
    Board, Fruit, GameId, GameState, MoveRequest, Position, Snake, Tick, Velocity,
};
pub use rules::{DiagonalRule, FruitPlacement, Rules};

pub const INITIAL_SCORE: u32 = 0;

// Main engine trait that different rule sets can implement
pub trait GameEngine {
    fn new_game<R: Rng>(
        &self,
        width: i32,
        height: i32,
        game_id: GameId,
        rng: &mut R,
    ) -> GameState;
    fn play<R: Rng>(&self, request: MoveRequest, rng: &mut R) -> Result<Replay, IllegalMove>;
}

/// Result of a replay in which every tick was legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub state: GameState,
    pub fruit_found: bool,
}

/// Hands out time-derived game ids. Ids from one source are strictly
/// increasing, even when two are requested within the same clock tick.
#[derive(Debug, Default)]
pub struct GameIdSource {
    last: AtomicU64,
}

impl GameIdSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> GameId {
        let now = chrono::Utc::now()
            .timestamp_nanos_opt()
            .map_or(0, |nanos| nanos.max(0) as u64);

        let issue = |last: u64| now.max(last.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(issue(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };

        GameId::new(issue(previous).to_string())
    }
}

// Standard single-snake engine
#[derive(Debug, Clone, Default)]
pub struct StandardEngine {
    rules: Rules,
}

impl StandardEngine {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Runs the movement checks for one tick, in order: magnitude, reversal,
    /// diagonal, bounds. `previous` is the last committed velocity and `landed`
    /// is where the tick has already moved the snake.
    pub fn check_tick(
        &self,
        previous: Velocity,
        tick: Tick,
        landed: Position,
        board: Board,
    ) -> Result<(), RuleViolation> {
        if !is_unit_step(tick.vel_x) || !is_unit_step(tick.vel_y) {
            return Err(RuleViolation::InvalidMove);
        }

        if is_reverse_move(previous, tick) {
            return Err(RuleViolation::ReverseMove);
        }

        match self.rules.diagonal {
            DiagonalRule::Literal => {
                if tick.vel_x == tick.vel_y {
                    return Err(RuleViolation::DiagonalMove);
                }
            }
            DiagonalRule::Strict => {
                if tick.vel_x != 0 && tick.vel_y != 0 {
                    return Err(RuleViolation::DiagonalMove);
                }
                if tick.vel_x == 0 && tick.vel_y == 0 {
                    return Err(RuleViolation::InvalidMove);
                }
            }
        }

        if !board.contains(landed) {
            return Err(RuleViolation::OutOfBounds);
        }

        Ok(())
    }

    pub fn spawn_fruit<R: Rng>(&self, board: Board, snake: &Snake, rng: &mut R) -> Fruit {
        let attempts = match self.rules.fruit_placement {
            FruitPlacement::Anywhere => 1,
            FruitPlacement::AvoidSnake { max_attempts } => max_attempts.max(1),
        };

        let mut position = random_cell(board, rng);
        for _ in 1..attempts {
            if position != snake.position() {
                break;
            }
            position = random_cell(board, rng);
        }

        Fruit::from(position)
    }
}

impl GameEngine for StandardEngine {
    fn new_game<R: Rng>(
        &self,
        width: i32,
        height: i32,
        game_id: GameId,
        rng: &mut R,
    ) -> GameState {
        let board = Board::new(width, height);
        let snake = Snake::new(Velocity::RIGHT);
        let fruit = self.spawn_fruit(board, &snake, rng);

        let state = GameState {
            game_id,
            width,
            height,
            score: INITIAL_SCORE,
            fruit,
            snake,
        };

        tracing::info!(
            game_id = %state.game_id,
            width,
            height,
            fruit_x = fruit.x,
            fruit_y = fruit.y,
            "New game created"
        );
        display::trace_board("New game", &state);

        state
    }

    fn play<R: Rng>(&self, request: MoveRequest, rng: &mut R) -> Result<Replay, IllegalMove> {
        let MoveRequest { mut state, ticks } = request;
        let board = state.board();
        let mut fruit_found = false;

        for (index, tick) in ticks.into_iter().enumerate() {
            // The move is applied before it is validated, so a rejected tick
            // leaves its position in the returned state.
            let landed = state.snake.position().step(tick);
            state.snake.move_to(landed);

            tracing::debug!(
                game_id = %state.game_id,
                tick = index + 1,
                x = landed.x,
                y = landed.y,
                vel_x = tick.vel_x,
                vel_y = tick.vel_y,
                "Applied tick"
            );
            display::trace_board("Move", &state);

            if landed == state.fruit.position() {
                fruit_found = true;
            }

            if let Err(violation) = self.check_tick(state.snake.velocity(), tick, landed, board)
            {
                tracing::info!(
                    game_id = %state.game_id,
                    tick = index + 1,
                    %violation,
                    "Illegal move"
                );
                return Err(IllegalMove {
                    tick: index,
                    violation,
                    state,
                    fruit_found,
                });
            }

            state.snake.turn(tick);
        }

        if fruit_found {
            state.score = state.score.saturating_add(1);
            state.fruit = self.spawn_fruit(board, &state.snake, rng);

            tracing::info!(
                game_id = %state.game_id,
                score = state.score,
                fruit_x = state.fruit.x,
                fruit_y = state.fruit.y,
                "Fruit eaten"
            );
            display::trace_board("Fruit respawned", &state);
        }

        Ok(Replay { state, fruit_found })
    }
}

fn is_unit_step(component: i32) -> bool {
    (-1..=1).contains(&component)
}

// A 180-degree turn along either axis
fn is_reverse_move(previous: Velocity, tick: Tick) -> bool {
    (tick.vel_x != 0 && previous.vel_x.checked_neg() == Some(tick.vel_x))
        || (tick.vel_y != 0 && previous.vel_y.checked_neg() == Some(tick.vel_y))
}

// Degenerate boards collapse to the origin and are caught by `check_invariants`
fn random_cell<R: Rng>(board: Board, rng: &mut R) -> Position {
    Position::new(
        rng.gen_range(0..board.width.max(1)),
        rng.gen_range(0..board.height.max(1)),
    )
}
