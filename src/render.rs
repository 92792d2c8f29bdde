//! Drawing contract and frame composition.
//!
//! Everything here paints into a [`Canvas`] back buffer; nothing reaches the screen
//! until [`Canvas::show`].

use std::process::exit;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tracing::error;

use crate::config::{
    BORDER_CORNER_CHAR, BORDER_HORIZONTAL_CHAR, BORDER_VERTICAL_CHAR, FOOD_CHAR, HEIGHT,
    SNAKE_BODY_CHAR, WIDTH,
};
use crate::food::Food;
use crate::game::GameMode;
use crate::grid::Position;
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Border,
    Text,
    Snake,
    Food,
}

pub trait Canvas: Send {
    fn init(&mut self) -> Result<()>;
    fn shutdown(&mut self) -> Result<()>;
    /// Blanks the back buffer.
    fn clear(&mut self);
    fn set_cell(&mut self, pos: Position, glyph: char, style: Style);
    /// Paints the back buffer.
    fn show(&mut self) -> Result<()>;
    /// Repaints everything after the physical screen changed size.
    fn sync(&mut self) -> Result<()>;
}

/// The canvas is painted from the game loop, the mode setter and the input thread.
pub type SharedCanvas<C> = Arc<Mutex<C>>;

pub fn lock<C>(canvas: &Mutex<C>) -> MutexGuard<'_, C> {
    canvas.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restores the terminal and ends the process.
pub fn terminate<C: Canvas>(canvas: &Mutex<C>, code: i32) -> ! {
    if let Err(err) = lock(canvas).shutdown() {
        error!(?err, "failed to restore terminal");
    }
    exit(code)
}

/// Logs a fatal error from a worker thread, then tears the process down.
pub fn abort<C: Canvas>(canvas: &Mutex<C>, err: anyhow::Error) -> ! {
    error!("fatal: {:#}", err);
    terminate(canvas, 1)
}

pub fn draw_text<C: Canvas + ?Sized>(canvas: &mut C, at: Position, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        canvas.set_cell(at.offset((i as i32, 0)), ch, style);
    }
}

pub fn draw_border<C: Canvas + ?Sized>(canvas: &mut C) {
    for x in 0..=WIDTH {
        let ch = if x == 0 || x == WIDTH {BORDER_CORNER_CHAR} else {BORDER_HORIZONTAL_CHAR};
        canvas.set_cell(Position::new(x, 0), ch, Style::Border);
        canvas.set_cell(Position::new(x, HEIGHT), ch, Style::Border);
    }

    for y in 1..HEIGHT {
        canvas.set_cell(Position::new(0, y), BORDER_VERTICAL_CHAR, Style::Border);
        canvas.set_cell(Position::new(WIDTH, y), BORDER_VERTICAL_CHAR, Style::Border);
    }
}

/// Mode picker shown before the game starts, with `> ` marking the current mode.
pub fn draw_menu<C: Canvas + ?Sized>(canvas: &mut C, current: GameMode) {
    let x = WIDTH / 10;
    let mut y = HEIGHT / 10;

    y += 1;
    draw_text(canvas, Position::new(x, y), "  Select Game Mode : ", Style::Text);

    for mode in GameMode::ALL.iter() {
        y += 1;
        let marker = if *mode == current {"> "} else {"  "};
        draw_text(canvas, Position::new(x, y), &format!("{}{}", marker, mode.label()), Style::Text);
    }

    y += 1;
    draw_text(canvas, Position::new(x, y), "                Press ENTER To Continue", Style::Text);
}

pub fn draw_food<C: Canvas + ?Sized>(canvas: &mut C, food: Food) {
    canvas.set_cell(food.position(), FOOD_CHAR, Style::Food);
}

pub fn draw_snake<C: Canvas + ?Sized>(canvas: &mut C, snake: &Snake) {
    let head = snake.len() - 1;

    for (i, pos) in snake.body().iter().enumerate() {
        let ch = if i == head {snake.head_char()} else {SNAKE_BODY_CHAR};
        canvas.set_cell(*pos, ch, Style::Snake);
    }
}

pub fn draw_game_over<C: Canvas + ?Sized>(canvas: &mut C, score: usize) {
    let at = Position::new(WIDTH / 5, HEIGHT / 5);
    draw_text(canvas, at, "GAME OVER", Style::Text);
    draw_text(canvas, at.offset((0, 1)), &format!("Score: {}", score), Style::Text);
}

/// Full pre-start frame: border and mode menu.
pub fn show_menu<C: Canvas + ?Sized>(canvas: &mut C, current: GameMode) -> Result<()> {
    canvas.clear();
    draw_border(canvas);
    draw_menu(canvas, current);
    canvas.show()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::INITIAL_BODY;
    use crate::snake::Direction;
    use crate::test_utils::RecordingCanvas;

    #[test]
    fn test_border_corners_and_edges() {
        let mut canvas = RecordingCanvas::default();
        draw_border(&mut canvas);

        assert_eq!(canvas.glyph_at((0, 0)), Some(BORDER_CORNER_CHAR));
        assert_eq!(canvas.glyph_at((WIDTH, HEIGHT)), Some(BORDER_CORNER_CHAR));
        assert_eq!(canvas.glyph_at((5, 0)), Some(BORDER_HORIZONTAL_CHAR));
        assert_eq!(canvas.glyph_at((WIDTH, 5)), Some(BORDER_VERTICAL_CHAR));
        assert_eq!(canvas.glyph_at((5, 5)), None);
    }

    #[test]
    fn test_menu_marks_current_mode() {
        let mut canvas = RecordingCanvas::default();
        show_menu(&mut canvas, GameMode::Hard).unwrap();

        let text = canvas.text();
        assert!(text.contains("> HARD"));
        assert!(text.contains("  MEDIUM"));
        assert!(!text.contains("> MEDIUM"));
        assert_eq!(canvas.shown, 1);
    }

    #[test]
    fn test_snake_head_glyph() {
        let mut canvas = RecordingCanvas::default();
        let snake = Snake::new(INITIAL_BODY.to_vec(), Direction::Right);
        draw_snake(&mut canvas, &snake);

        assert_eq!(canvas.glyph_at((4, 5)), Some('>'));
        assert_eq!(canvas.glyph_at((1, 2)), Some(SNAKE_BODY_CHAR));
    }

    #[test]
    fn test_game_over_banner() {
        let mut canvas = RecordingCanvas::default();
        draw_game_over(&mut canvas, 3);

        let text = canvas.text();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score: 3"));
    }
}
