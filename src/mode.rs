use anyhow::Result;
use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::events::ModeSignal;
use crate::game::{Session, Status};
use crate::render::{self, Canvas, SharedCanvas};

/// How mode selection finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEnd {
    Confirmed,
    /// The listener went away without confirming.
    Disconnected,
}

/// Applies menu shifts to the session and repaints the menu until the selection
/// is confirmed. Every shift queued ahead of the confirmation is applied, even
/// when the listener already started the game; the mode is locked on the way out.
pub fn run_mode_setter<C: Canvas>(
    session: &Session,
    canvas: &SharedCanvas<C>,
    signals: &Receiver<ModeSignal>,
) -> Result<SelectionEnd> {
    let end = select_mode(session, canvas, signals);
    session.lock_mode();
    debug!(mode = session.mode().label(), "mode selection closed");
    end
}

fn select_mode<C: Canvas>(
    session: &Session,
    canvas: &SharedCanvas<C>,
    signals: &Receiver<ModeSignal>,
) -> Result<SelectionEnd> {
    for signal in signals.iter() {
        match signal {
            ModeSignal::Shift(shift) => {
                if let Some(mode) = session.shift_mode(shift) {
                    info!(mode = mode.label(), "mode changed");
                    let mut canvas = render::lock(canvas);
                    // The game loop owns the screen once the game runs.
                    if session.status() == Status::NotStarted {
                        render::show_menu(&mut *canvas, mode)?;
                    }
                }
            }
            ModeSignal::Confirmed => return Ok(SelectionEnd::Confirmed),
        }
    }

    Ok(SelectionEnd::Disconnected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameMode, Shift};
    use crate::test_utils::RecordingCanvas;
    use crossbeam_channel::unbounded;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_shifts_then_confirm() {
        let session = Session::new();
        let canvas = Arc::new(Mutex::new(RecordingCanvas::default()));
        let (tx, rx) = unbounded();

        tx.send(ModeSignal::Shift(Shift::Easier)).unwrap();
        tx.send(ModeSignal::Shift(Shift::Easier)).unwrap();
        tx.send(ModeSignal::Shift(Shift::Easier)).unwrap();
        tx.send(ModeSignal::Confirmed).unwrap();
        tx.send(ModeSignal::Shift(Shift::Harder)).unwrap();

        let end = run_mode_setter(&session, &canvas, &rx).unwrap();
        assert_eq!(end, SelectionEnd::Confirmed);
        assert_eq!(session.mode(), GameMode::Easy);

        let canvas = render::lock(&canvas);
        assert_eq!(canvas.shown, 3);
        assert!(canvas.text().contains("> EASY"));
    }

    #[test]
    fn test_disconnect_ends_selection() {
        let session = Session::new();
        let canvas = Arc::new(Mutex::new(RecordingCanvas::default()));
        let (tx, rx) = unbounded();

        tx.send(ModeSignal::Shift(Shift::Harder)).unwrap();
        drop(tx);

        let end = run_mode_setter(&session, &canvas, &rx).unwrap();
        assert_eq!(end, SelectionEnd::Disconnected);
        assert_eq!(session.mode(), GameMode::Hard);
        assert_eq!(session.shift_mode(Shift::Easier), None);
    }

    #[test]
    fn test_queued_shifts_apply_after_start() {
        let session = Session::new();
        let canvas = Arc::new(Mutex::new(RecordingCanvas::default()));
        let (tx, rx) = unbounded();

        tx.send(ModeSignal::Shift(Shift::Harder)).unwrap();
        tx.send(ModeSignal::Confirmed).unwrap();
        session.start();

        let end = run_mode_setter(&session, &canvas, &rx).unwrap();
        assert_eq!(end, SelectionEnd::Confirmed);
        assert_eq!(session.mode(), GameMode::Hard);
        // No menu over a running game.
        assert_eq!(render::lock(&canvas).shown, 0);
    }

    #[test]
    fn test_mode_locked_after_confirm() {
        let session = Session::new();
        let canvas = Arc::new(Mutex::new(RecordingCanvas::default()));
        let (tx, rx) = unbounded();

        tx.send(ModeSignal::Confirmed).unwrap();
        run_mode_setter(&session, &canvas, &rx).unwrap();

        assert_eq!(session.shift_mode(Shift::Harder), None);
        assert_eq!(session.mode(), GameMode::Medium);
    }
}
