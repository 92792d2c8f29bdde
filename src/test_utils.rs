//! In-memory stand-ins for the terminal, used by unit tests.

use std::collections::{HashMap, VecDeque};

use anyhow::{anyhow, Result};

use crate::config::{HEIGHT, WIDTH};
use crate::grid::Position;
use crate::input::{InputEvent, InputSource};
use crate::render::{Canvas, Style};

/// Canvas that keeps the back buffer in a map and counts paints.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub cells: HashMap<Position, (char, Style)>,
    pub shown: usize,
    pub synced: usize,
}

impl RecordingCanvas {
    pub fn glyph_at(&self, pos: impl Into<Position>) -> Option<char> {
        self.cells.get(&pos.into()).map(|(ch, _)| *ch)
    }

    /// The buffer as board-sized lines of text.
    pub fn text(&self) -> String {
        (0..=HEIGHT)
            .map(|y| {
                (0..=WIDTH)
                    .map(|x| self.glyph_at((x, y)).unwrap_or(' '))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for RecordingCanvas {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) {
        self.cells.clear();
    }

    fn set_cell(&mut self, pos: Position, glyph: char, style: Style) {
        self.cells.insert(pos, (glyph, style));
    }

    fn show(&mut self) -> Result<()> {
        self.shown += 1;
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        self.synced += 1;
        Ok(())
    }
}

/// Replays a fixed list of events, then fails like a closed terminal would.
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        ScriptedInput { events: events.into() }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Result<InputEvent> {
        self.events.pop_front().ok_or_else(|| anyhow!("input script exhausted"))
    }
}
