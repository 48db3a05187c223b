use clap::{Parser, ValueEnum};

use crate::engine::{
    DiagonalRule, FruitPlacement, Rules,
    rules::{DEFAULT_FRUIT_ATTEMPTS, MIN_DIMENSION},
};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "snake-validator")]
#[command(about = "Stateless snake move validation service", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "SNAKE_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// How diagonal ticks are detected
    #[arg(long, env = "SNAKE_DIAGONAL_RULE", value_enum, default_value_t = DiagonalMode::Literal)]
    pub diagonal_rule: DiagonalMode,

    /// Keep new fruit off the snake's cell
    #[arg(long, env = "SNAKE_AVOID_SNAKE")]
    pub avoid_snake: bool,

    /// Draws allowed when placing fruit away from the snake
    #[arg(long, env = "SNAKE_FRUIT_ATTEMPTS", default_value_t = DEFAULT_FRUIT_ATTEMPTS)]
    pub fruit_attempts: u32,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "SNAKE_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagonalMode {
    /// Equal components are diagonal, (0,0) included
    Literal,
    /// Both components non-zero are diagonal, (0,0) is invalid
    Strict,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            diagonal_rule: DiagonalMode::Literal,
            avoid_snake: false,
            fruit_attempts: DEFAULT_FRUIT_ATTEMPTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn rules(&self) -> Rules {
        let diagonal = match self.diagonal_rule {
            DiagonalMode::Literal => DiagonalRule::Literal,
            DiagonalMode::Strict => DiagonalRule::Strict,
        };

        let fruit_placement = if self.avoid_snake {
            FruitPlacement::AvoidSnake {
                max_attempts: self.fruit_attempts,
            }
        } else {
            FruitPlacement::Anywhere
        };

        Rules {
            min_dimension: MIN_DIMENSION,
            diagonal,
            fruit_placement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let parsed = Config::try_parse_from(["snake-validator"]).unwrap();
        let default = Config::default();

        assert_eq!(parsed.addr, default.addr);
        assert_eq!(parsed.diagonal_rule, default.diagonal_rule);
        assert_eq!(parsed.avoid_snake, default.avoid_snake);
        assert_eq!(parsed.fruit_attempts, default.fruit_attempts);
        assert_eq!(parsed.max_body_bytes, default.max_body_bytes);
    }

    #[test]
    fn test_rules_from_flags() {
        let config = Config::try_parse_from([
            "snake-validator",
            "--diagonal-rule",
            "strict",
            "--avoid-snake",
            "--fruit-attempts",
            "4",
        ])
        .unwrap();

        let rules = config.rules();
        assert_eq!(rules.diagonal, DiagonalRule::Strict);
        assert_eq!(
            rules.fruit_placement,
            FruitPlacement::AvoidSnake { max_attempts: 4 }
        );
    }

    #[test]
    fn test_rejects_unknown_diagonal_rule() {
        assert!(Config::try_parse_from(["snake-validator", "--diagonal-rule", "sideways"]).is_err());
    }
}
