//! Input listener: turns terminal events into menu signals before the game starts
//! and into movement signals afterwards.

use anyhow::Result;
use crossbeam_channel::Sender;
use tracing::{debug, warn};

use crate::events::{ModeSignal, Steer};
use crate::game::{Session, Shift, Status};
use crate::render::{self, Canvas, SharedCanvas};
use crate::snake::Direction;

/// Logical keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    /// Ctrl+C; raw mode swallows the signal so it arrives as a key.
    Interrupt,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize,
    Other,
}

pub trait InputSource {
    /// Blocks until the next event.
    fn next_event(&mut self) -> Result<InputEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Listener<C> {
    session: Session,
    canvas: SharedCanvas<C>,
    steer_tx: Sender<Steer>,
    mode_tx: Option<Sender<ModeSignal>>,
}

impl<C: Canvas> Listener<C> {
    pub fn new(
        session: Session,
        canvas: SharedCanvas<C>,
        steer_tx: Sender<Steer>,
        mode_tx: Sender<ModeSignal>,
    ) -> Self {
        Listener { session, canvas, steer_tx, mode_tx: Some(mode_tx) }
    }

    /// Reads events until a quit key. Input and renderer errors are returned as is.
    pub fn run<I: InputSource + ?Sized>(mut self, input: &mut I) -> Result<()> {
        loop {
            let event = input.next_event()?;
            if self.handle(event)? == Flow::Quit {
                debug!("quit requested");
                return Ok(());
            }
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Result<Flow> {
        match event {
            InputEvent::Resize => {
                debug!("terminal resized");
                render::lock(&self.canvas).sync()?;
            }
            InputEvent::Key(key) => {
                if self.session.status() == Status::NotStarted {
                    self.select_mode(key);
                } else {
                    return Ok(self.steer(key));
                }
            }
            InputEvent::Other => {}
        }

        Ok(Flow::Continue)
    }

    fn select_mode(&mut self, key: Key) {
        match key {
            Key::Up => self.send_mode(ModeSignal::Shift(Shift::Easier)),
            Key::Down => self.send_mode(ModeSignal::Shift(Shift::Harder)),
            Key::Escape | Key::Enter => self.confirm(),
            _ => {}
        }
    }

    fn confirm(&mut self) {
        if !self.session.start() {
            return;
        }

        // Dropping the sender after the last message closes the menu channel.
        if let Some(mode_tx) = self.mode_tx.take() {
            if mode_tx.send(ModeSignal::Confirmed).is_err() {
                warn!("mode setter is gone");
            }
        }
        self.send_steer(Steer::Continue);
    }

    fn steer(&self, key: Key) -> Flow {
        match key {
            Key::Escape | Key::Interrupt => return Flow::Quit,
            Key::Up => self.send_steer(Steer::Turn(Direction::Up)),
            Key::Down => self.send_steer(Steer::Turn(Direction::Down)),
            Key::Left => self.send_steer(Steer::Turn(Direction::Left)),
            Key::Right => self.send_steer(Steer::Turn(Direction::Right)),
            Key::Enter | Key::Other => {}
        }

        Flow::Continue
    }

    fn send_mode(&self, signal: ModeSignal) {
        if let Some(mode_tx) = &self.mode_tx {
            if mode_tx.send(signal).is_err() {
                warn!(?signal, "mode setter is gone");
            }
        }
    }

    fn send_steer(&self, steer: Steer) {
        if self.steer_tx.send(steer).is_err() {
            warn!(?steer, "game loop is gone");
        }
    }
}
