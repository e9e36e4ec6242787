use crate::scheduler::{Scheduler, Tick};
use crate::screen::Screen;

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Interval between scheduling checks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the cue display until the user quits.
///
/// The start instant is captured once, before the first tick, and elapsed
/// time is always measured against it. Waiting for input doubles as the tick
/// cadence: each poll timeout is one scheduling check. The loop keeps running
/// after the last cue, so the final text stays on screen until the display is
/// closed.
pub fn run(mut scheduler: Scheduler, mut screen: Screen) -> Result<()> {
    let started = Instant::now();
    loop {
        if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if is_quit(&key) => return Ok(()),
                Event::Resize(_, _) => screen.redraw()?,
                _ => {}
            }
        } else if !scheduler.is_done() {
            if let Tick::Display(cue) = scheduler.tick(started.elapsed()) {
                screen.show(cue)?;
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quits_on_q_escape_and_ctrl_c() {
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn ignores_other_keys() {
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
