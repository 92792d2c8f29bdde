//! Board geometry, timings and glyphs.

use crate::grid::Position;

/// Rightmost border column; the playable columns are `1..WIDTH`.
pub const WIDTH: i32 = 80;

/// Bottom border row; the playable rows are `1..HEIGHT`.
pub const HEIGHT: i32 = 25;

/// Body of a freshly created snake, tail first.
pub const INITIAL_BODY: [Position; 4] = [
    Position::new(1, 2),
    Position::new(2, 3),
    Position::new(3, 4),
    Position::new(4, 5),
];

/// Pending movement signals the input thread may queue ahead of the game loop.
pub const STEER_CHANNEL_CAPACITY: usize = 10;

pub const MODE_CHANNEL_CAPACITY: usize = 1;

pub const SNAKE_BODY_CHAR: char = '█';
pub const FOOD_CHAR: char = 'O';
pub const BORDER_CORNER_CHAR: char = '+';
pub const BORDER_HORIZONTAL_CHAR: char = '-';
pub const BORDER_VERTICAL_CHAR: char = '|';

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "snake_tui=debug";
