//! The main thread's loop: repaints and advances the snake on a timer whose period
//! follows the difficulty mode, and applies movement signals as soon as they arrive.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{at, select, Receiver};
use rand::{rngs::StdRng, Rng};
use tracing::debug;

use crate::events::Steer;
use crate::game::{Game, MoveOutcome, Status};
use crate::render::{self, Canvas, SharedCanvas};

pub struct GameLoop<C, R = StdRng> {
    game: Game<R>,
    canvas: SharedCanvas<C>,
}

impl<C: Canvas, R: Rng> GameLoop<C, R> {
    pub fn new(game: Game<R>, canvas: SharedCanvas<C>) -> Self {
        GameLoop { game, canvas }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Runs until the movement channel disconnects.
    pub fn run(&mut self, steers: &Receiver<Steer>) -> Result<()> {
        self.paint()?;
        let mut deadline = self.next_deadline();

        loop {
            let tick = at(deadline);
            select! {
                recv(steers) -> steer => match steer {
                    Ok(steer) => {
                        self.on_steer(steer)?;
                    }
                    Err(_) => {
                        debug!("movement channel closed");
                        return Ok(());
                    }
                },
                recv(tick) -> _ => {
                    self.on_tick()?;
                    // Re-read so a mode picked in the menu applies from the next tick.
                    deadline = self.next_deadline();
                }
            }
        }
    }

    /// Timer wake-up: keeps the snake going along its heading once the game runs.
    /// Returns `None` when no move was due.
    pub fn on_tick(&mut self) -> Result<Option<MoveOutcome>> {
        let outcome = if self.game.session().status() == Status::Started {
            Some(self.game.keep_going())
        } else {
            None
        };

        self.paint()?;
        Ok(outcome)
    }

    /// Input wake-up: moves right away, outside the timer's rhythm.
    pub fn on_steer(&mut self, steer: Steer) -> Result<MoveOutcome> {
        let outcome = match steer {
            Steer::Turn(direction) => self.game.advance(direction),
            Steer::Continue => self.game.keep_going(),
        };

        self.paint()?;
        Ok(outcome)
    }

    /// Period of the next tick, read from the current mode.
    pub fn tick_interval(&self) -> Duration {
        self.game.session().mode().tick_interval()
    }

    fn next_deadline(&self) -> Instant {
        Instant::now() + self.tick_interval()
    }

    /// Redraws the whole frame from a blank buffer.
    fn paint(&self) -> Result<()> {
        let session = self.game.session();
        let status = session.status();
        let mut canvas = render::lock(&self.canvas);

        canvas.clear();
        render::draw_border(&mut *canvas);
        match status {
            Status::NotStarted => render::draw_menu(&mut *canvas, session.mode()),
            Status::Started | Status::GameOver => {
                render::draw_food(&mut *canvas, self.game.food());
                render::draw_snake(&mut *canvas, self.game.snake());
            }
        }
        if status == Status::GameOver {
            render::draw_game_over(&mut *canvas, self.game.score());
        }

        canvas.show()
    }
}
