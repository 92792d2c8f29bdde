//! Game state: the lifecycle shared between threads and the board owned by the
//! game loop.
//!
//! [`Session`] holds the status and difficulty mode, the only fields read from more
//! than one thread outside the channel protocol. [`Game`] holds the snake and the
//! food and is never shared: only the game loop thread moves the snake.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::{rngs::StdRng, Rng};
use tracing::{debug, info};

use crate::config::INITIAL_BODY;
use crate::food::Food;
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Easy,
    Medium,
    Hard,
}

/// A one-step change of difficulty requested from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Easier,
    Harder,
}

impl GameMode {
    /// Menu order.
    pub const ALL: [GameMode; 3] = [GameMode::Easy, GameMode::Medium, GameMode::Hard];

    pub fn tick_interval(self) -> Duration {
        match self {
            GameMode::Easy => Duration::from_millis(800),
            GameMode::Medium => Duration::from_millis(500),
            GameMode::Hard => Duration::from_millis(100),
        }
    }

    /// Moves one step along EASY - MEDIUM - HARD, clamped at both ends.
    pub fn shifted(self, shift: Shift) -> Self {
        match (self, shift) {
            (GameMode::Hard, Shift::Easier) => GameMode::Medium,
            (GameMode::Medium, Shift::Easier) | (GameMode::Easy, Shift::Easier) => GameMode::Easy,
            (GameMode::Easy, Shift::Harder) => GameMode::Medium,
            (GameMode::Medium, Shift::Harder) | (GameMode::Hard, Shift::Harder) => GameMode::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Easy => "EASY",
            GameMode::Medium => "MEDIUM",
            GameMode::Hard => "HARD",
        }
    }
}

/// Lifecycle phase. Only ever moves forward: NotStarted, Started, GameOver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Started,
    GameOver,
}

#[derive(Debug)]
struct Lifecycle {
    status: Status,
    mode: GameMode,
    /// Set once the menu channel has delivered its last signal.
    mode_locked: bool,
}

/// Cloneable handle to the status and mode, guarded by one lock.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<Lifecycle>>,
}

impl Session {
    pub fn new() -> Self {
        let lifecycle = Lifecycle {
            status: Status::NotStarted,
            mode: GameMode::Medium,
            mode_locked: false,
        };
        Session { inner: Arc::new(Mutex::new(lifecycle)) }
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        // The guarded fields are plain values, a panicking holder can't leave them torn.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> Status {
        self.lock().status
    }

    pub fn mode(&self) -> GameMode {
        self.lock().mode
    }

    pub fn is_game_over(&self) -> bool {
        self.status() == Status::GameOver
    }

    /// Applies a menu shift. Returns the new mode, or `None` once the mode is locked.
    ///
    /// Shifts still apply after `start`: the menu signals queued ahead of the
    /// confirmation belong to the selection and are drained after the status moved.
    pub fn shift_mode(&self, shift: Shift) -> Option<GameMode> {
        let mut lifecycle = self.lock();
        if lifecycle.mode_locked {
            return None;
        }

        lifecycle.mode = lifecycle.mode.shifted(shift);
        Some(lifecycle.mode)
    }

    /// Freezes the mode for the rest of the game.
    pub fn lock_mode(&self) {
        self.lock().mode_locked = true;
    }

    /// NotStarted -> Started. Returns false if the game was already running or over.
    pub fn start(&self) -> bool {
        let mut lifecycle = self.lock();
        if lifecycle.status != Status::NotStarted {
            return false;
        }

        lifecycle.status = Status::Started;
        info!(mode = lifecycle.mode.label(), "game started");
        true
    }

    /// Marks the game over. Returns false if it already was.
    pub fn end(&self) -> bool {
        let mut lifecycle = self.lock();
        if lifecycle.status == Status::GameOver {
            return false;
        }

        lifecycle.status = Status::GameOver;
        true
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single movement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The direction reversed the heading; nothing changed.
    Rejected,
    Advanced,
    Grew,
    /// The head would have left the board; the game is now over.
    Collided,
    /// The game was already over; nothing changed.
    Over,
}

/// Snake and food, owned by the game loop thread.
pub struct Game<R = StdRng> {
    snake: Snake,
    food: Food,
    session: Session,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// A fresh game: the initial snake heading right and a randomly placed food.
    pub fn new(session: Session, mut rng: R) -> Self {
        let snake = Snake::new(INITIAL_BODY.to_vec(), Direction::Right);
        let food = Food::random(&mut rng);
        Game::with_board(session, snake, food, rng)
    }

    pub fn with_board(session: Session, snake: Snake, food: Food, rng: R) -> Self {
        Game { snake, food, session, rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Cells gained since the start.
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(INITIAL_BODY.len())
    }

    /// One movement step along `direction`. The timer and the input both drive the
    /// snake through here; the timer passes the current heading.
    pub fn advance(&mut self, direction: Direction) -> MoveOutcome {
        if self.session.is_game_over() {
            return MoveOutcome::Over;
        }

        if !self.snake.turn(direction) {
            debug!(?direction, heading = ?self.snake.heading(), "reversal rejected");
            return MoveOutcome::Rejected;
        }

        let new_head = self.snake.next_head();
        if new_head.is_out_of_bounds() {
            if self.session.end() {
                info!(x = new_head.x, y = new_head.y, score = self.score(), "game over");
            }
            return MoveOutcome::Collided;
        }

        if self.food.is_at(new_head) {
            self.snake.grow(new_head);
            // Food may land on the snake or the border, nothing is excluded.
            self.food = Food::random(&mut self.rng);
            debug!(len = self.snake.len(), food = ?self.food.position(), "snake grew");
            MoveOutcome::Grew
        } else {
            self.snake.advance(new_head);
            MoveOutcome::Advanced
        }
    }

    /// One step along the current heading.
    pub fn keep_going(&mut self) -> MoveOutcome {
        self.advance(self.snake.heading())
    }
}
