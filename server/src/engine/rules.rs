// Rule configuration for move validation and fruit placement

/// Boards must be strictly larger than this in both directions.
pub const MIN_DIMENSION: i32 = 2;

/// Attempts made before giving up on finding a free cell for the fruit.
pub const DEFAULT_FRUIT_ATTEMPTS: u32 = 16;

#[derive(Debug, Clone)]
pub struct Rules {
    pub min_dimension: i32,
    pub diagonal: DiagonalRule,
    pub fruit_placement: FruitPlacement,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            min_dimension: MIN_DIMENSION,
            diagonal: DiagonalRule::Literal,
            fruit_placement: FruitPlacement::Anywhere,
        }
    }
}

impl Rules {
    pub fn dimensions_valid(&self, width: i32, height: i32) -> bool {
        width > self.min_dimension && height > self.min_dimension
    }
}

/// How a tick is classified as diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalRule {
    /// `vel_x == vel_y`. Flags (1,1), (-1,-1) and (0,0) but lets (1,-1) and
    /// (-1,1) through.
    #[default]
    Literal,
    /// Both components non-zero is diagonal; a (0,0) tick is an invalid move.
    Strict,
}

/// Where a freshly spawned fruit may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FruitPlacement {
    /// Uniform over the whole board, including the snake's cell.
    #[default]
    Anywhere,
    /// Resample while the fruit lands on the snake, at most `max_attempts` draws.
    AvoidSnake { max_attempts: u32 },
}
