use std::io::{Stdout, Write, stdout};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{StyledContent, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::config::{HEIGHT, WIDTH};
use crate::grid::Position;
use crate::input::{InputEvent, InputSource, Key};
use crate::render::{Canvas, Style};

const COLUMNS: usize = WIDTH as usize + 1;
const ROWS: usize = HEIGHT as usize + 1;

type Cell = (char, Style);

const BLANK: Cell = (' ', Style::Text);

/// Crossterm backed canvas. Cells are drawn into `screen` and painted on `show`.
pub struct TermManager {
    stdout: Stdout,
    screen: Vec<Cell>,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), screen: vec![BLANK; COLUMNS * ROWS] }
    }

    fn index(pos: Position) -> Option<usize> {
        let (x, y) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        if x < COLUMNS && y < ROWS {
            Some(y * COLUMNS + x)
        } else {
            None
        }
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode.")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("Error setting cursor visibility.")
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for TermManager {
    fn init(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing.")
    }

    fn shutdown(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")
    }

    fn clear(&mut self) {
        self.screen.fill(BLANK);
    }

    fn set_cell(&mut self, pos: Position, glyph: char, style: Style) {
        if let Some(i) = Self::index(pos) {
            self.screen[i] = (glyph, style);
        }
    }

    fn show(&mut self) -> Result<()> {
        for (y, row) in self.screen.chunks(COLUMNS).enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16))?;
            for &(ch, style) in row {
                queue!(self.stdout, style::PrintStyledContent(styled(ch, style)))?;
            }
        }

        self.stdout.flush().context("Error flushing.")
    }

    fn sync(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing.")?;
        self.show()
    }
}

fn styled(ch: char, style: Style) -> StyledContent<char> {
    match style {
        Style::Border => ch.white(),
        Style::Text => ch.white().bold(),
        Style::Snake => ch.green().on_black(),
        Style::Food => ch.red().bold(),
    }
}

/// Blocking reader over crossterm's event queue.
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next_event(&mut self) -> Result<InputEvent> {
        let event = event::read().context("Error reading input.")?;
        Ok(translate(event))
    }
}

fn translate(event: Event) -> InputEvent {
    match event {
        Event::Key(key) => InputEvent::Key(logical_key(&key)),
        Event::Resize(_, _) => InputEvent::Resize,
        _ => InputEvent::Other,
    }
}

fn logical_key(ev: &KeyEvent) -> Key {
    if ev.kind != KeyEventKind::Press {
        return Key::Other;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}
