//! Messages sent from the input thread.
//!
//! Both channels are bounded and have exactly one producer, the input listener.

use crate::game::Shift;
use crate::snake::Direction;

/// Movement signal consumed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Turn(Direction),
    /// One step along the current heading, sent once when the game starts.
    Continue,
}

/// Menu signal consumed by the mode setter.
///
/// `Confirmed` is the last message on the channel: the listener drops its sender
/// right after sending it, so the channel closes exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSignal {
    Shift(Shift),
    Confirmed,
}
