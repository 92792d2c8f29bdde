//! Board coordinates.

use rand::Rng;

use crate::config::{HEIGHT, WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Position::new(self.x + dx, self.y + dy)
    }

    /// True when the position lies on the border or beyond it.
    pub fn is_out_of_bounds(self) -> bool {
        self.x <= 0 || self.x >= WIDTH || self.y <= 0 || self.y >= HEIGHT
    }

    /// Uniform pick over `[0, WIDTH) x [0, HEIGHT)`. The border row and column at
    /// zero are included and nothing is excluded for the snake's body.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Position::new(rng.gen_range(0..WIDTH), rng.gen_range(0..HEIGHT))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}
