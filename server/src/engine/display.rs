// Textual debug view of a board

use std::fmt;

use super::game_state::{GameState, Position};

pub const SNAKE_SYMBOL: char = 'S';
pub const FRUIT_SYMBOL: char = 'F';
pub const EMPTY_SYMBOL: char = 'O';

/// Boards larger than this are never rendered.
pub const MAX_RENDERED_CELLS: i64 = 4096;

/// Renders one row per `y`, one character per `x`. The snake is drawn over the
/// fruit when they share a cell.
pub struct BoardView<'a>(pub &'a GameState);

impl BoardView<'_> {
    pub fn is_renderable(&self) -> bool {
        self.0.board().cells() <= MAX_RENDERED_CELLS
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let snake = state.snake.position();
        let fruit = state.fruit.position();

        for y in 0..state.height {
            for x in 0..state.width {
                let cell = Position::new(x, y);
                let symbol = if cell == snake {
                    SNAKE_SYMBOL
                } else if cell == fruit {
                    FRUIT_SYMBOL
                } else {
                    EMPTY_SYMBOL
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Logs the board at debug level when that level is enabled and the board is
/// small enough to print.
pub fn trace_board(label: &str, state: &GameState) {
    let view = BoardView(state);
    if tracing::enabled!(tracing::Level::DEBUG) && view.is_renderable() {
        tracing::debug!(game_id = %state.game_id, score = state.score, "{label}\n{view}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_state::{Fruit, GameId, Snake};

    fn state(width: i32, height: i32, fruit: Fruit, snake: Snake) -> GameState {
        GameState {
            game_id: GameId::new("1"),
            width,
            height,
            score: 0,
            fruit,
            snake,
        }
    }

    #[test]
    fn test_render_board() {
        let state = state(
            4,
            3,
            Fruit { x: 2, y: 1 },
            Snake {
                x: 0,
                y: 0,
                vel_x: 1,
                vel_y: 0,
            },
        );

        assert_eq!(BoardView(&state).to_string(), "SOOO\nOOFO\nOOOO\n");
    }

    #[test]
    fn test_snake_drawn_over_fruit() {
        let state = state(
            3,
            3,
            Fruit { x: 1, y: 1 },
            Snake {
                x: 1,
                y: 1,
                vel_x: 0,
                vel_y: 1,
            },
        );

        assert_eq!(BoardView(&state).to_string(), "OOO\nOSO\nOOO\n");
    }

    #[test]
    fn test_large_boards_not_renderable() {
        let small = state(64, 64, Fruit::default(), Snake::default());
        let large = state(65, 64, Fruit::default(), Snake::default());

        assert!(BoardView(&small).is_renderable());
        assert!(!BoardView(&large).is_renderable());
    }
}
