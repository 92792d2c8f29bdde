use crate::grid::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// The snake's cells, tail first and head last, plus the heading it moves along.
#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Position>,
    heading: Direction,
}

impl Snake {
    /// Panics if `body` is empty.
    pub fn new(body: Vec<Position>, heading: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Snake { body, heading }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Points the snake along `new_heading` unless that would reverse it.
    /// Returns whether the heading was accepted.
    pub fn turn(&mut self, new_heading: Direction) -> bool {
        if new_heading.is_opposite(self.heading) {
            return false;
        }

        self.heading = new_heading;
        true
    }

    /// The cell the head would occupy after one step along the current heading.
    pub fn next_head(&self) -> Position {
        self.head().offset(self.heading.offset())
    }

    /// Moves onto `new_head` dropping the tail. Returns the vacated cell.
    pub fn advance(&mut self, new_head: Position) -> Position {
        self.body.push(new_head);
        self.body.remove(0)
    }

    /// Moves onto `new_head` keeping the tail.
    pub fn grow(&mut self, new_head: Position) {
        self.body.push(new_head);
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INITIAL_BODY;

    fn initial() -> Snake {
        Snake::new(INITIAL_BODY.to_vec(), Right)
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = initial();
        assert!(!snake.turn(Left));
        assert_eq!(snake.heading(), Right);

        snake.turn(Up);
        assert!(!snake.turn(Down));
        assert_eq!(snake.heading(), Up);
    }

    #[test]
    fn test_same_and_perpendicular_turns_are_accepted() {
        let mut snake = initial();
        assert!(snake.turn(Right));
        assert!(snake.turn(Down));
        assert_eq!(snake.heading(), Down);
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = initial();
        let head = snake.next_head();
        assert_eq!(head, Position::new(5, 5));

        let tail = snake.advance(head);
        assert_eq!(tail, Position::new(1, 2));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), head);
    }

    #[test]
    fn test_grow_keeps_tail() {
        let mut snake = initial();
        snake.grow(snake.next_head());
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.body()[0], Position::new(1, 2));
    }

    #[test]
    #[should_panic]
    fn test_empty_snake_panics() {
        Snake::new(vec![], Right);
    }
}
