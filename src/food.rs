use rand::Rng;

use crate::grid::Position;

/// The single food cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Food::at(Position::random(rng))
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_at(&self, pos: Position) -> bool {
        self.position == pos
    }
}
