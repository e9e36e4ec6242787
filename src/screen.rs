use crate::cue::Cue;

use std::io::{self, Stdout, Write};
use std::panic;

use anyhow::{Context, Result};
use clap::ValueEnum;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum Position {
    Top,
    Bottom,
}

/// The terminal surface the active cue is drawn on.
///
/// Raw mode and the alternate screen are entered on `open` and restored when
/// the screen is dropped, and by a panic hook installed before setup so a
/// panic does not leave the terminal unusable.
pub struct Screen {
    out: Stdout,
    color: Color,
    position: Position,
    shown: Option<Cue>,
}

impl Screen {
    pub fn open(color: Color, position: Position) -> Result<Self> {
        install_panic_hook();
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;

        Ok(Self {
            out,
            color,
            position,
            shown: None,
        })
    }

    /// Replaces the displayed text with the given cue.
    pub fn show(&mut self, cue: &Cue) -> Result<()> {
        self.draw(cue)?;
        self.shown = Some(cue.clone());
        Ok(())
    }

    /// Redraws the current cue, recentred for the new terminal geometry.
    pub fn redraw(&mut self) -> Result<()> {
        if let Some(cue) = self.shown.clone() {
            self.draw(&cue)?;
        }
        Ok(())
    }

    fn draw(&mut self, cue: &Cue) -> Result<()> {
        let (width, height) = size().context("Failed to query terminal size")?;
        // Two rows for the cue, one row of margin from the edge.
        let primary_row = match self.position {
            Position::Top => 1,
            Position::Bottom => height.saturating_sub(3),
        };
        let secondary_row = primary_row.saturating_add(1).min(height.saturating_sub(1));

        queue!(
            self.out,
            MoveTo(0, primary_row),
            Clear(ClearType::CurrentLine),
            MoveTo(centre_col(width, &cue.primary), primary_row),
            SetForegroundColor(self.color),
            SetAttribute(Attribute::Bold),
            Print(&cue.primary),
            SetAttribute(Attribute::NormalIntensity),
            MoveTo(0, secondary_row),
            Clear(ClearType::CurrentLine),
            MoveTo(centre_col(width, &cue.secondary), secondary_row),
            Print(&cue.secondary),
            ResetColor,
        )
        .context("Failed to draw cue")?;
        self.out.flush().context("Failed to flush terminal output")?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Restores the terminal before the default panic output is printed.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

/// Column at which `text` starts so that it sits centred on a `width`-column
/// terminal. Wide (CJK) characters count as two columns.
fn centre_col(width: u16, text: &str) -> u16 {
    use unicode_width::UnicodeWidthStr;

    let text_width = text.width().min(width as usize) as u16;
    (width - text_width) / 2
}

/// Parses a `--color` argument: a color name or `#RRGGBB` hex.
pub fn parse_color(name: &str) -> Result<Color, String> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let channels = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            );
            if let (Ok(r), Ok(g), Ok(b)) = channels {
                return Ok(Color::Rgb { r, g, b });
            }
        }
        return Err(format!("'{}' is not a #RRGGBB color", name));
    }

    match name.to_ascii_lowercase().as_str() {
        "white" => Ok(Color::White),
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "darkred" => Ok(Color::DarkRed),
        "green" => Ok(Color::Green),
        "darkgreen" => Ok(Color::DarkGreen),
        "yellow" => Ok(Color::Yellow),
        "darkyellow" => Ok(Color::DarkYellow),
        "blue" => Ok(Color::Blue),
        "darkblue" => Ok(Color::DarkBlue),
        "magenta" => Ok(Color::Magenta),
        "darkmagenta" => Ok(Color::DarkMagenta),
        "cyan" => Ok(Color::Cyan),
        "darkcyan" => Ok(Color::DarkCyan),
        "grey" | "gray" => Ok(Color::Grey),
        "darkgrey" | "darkgray" => Ok(Color::DarkGrey),
        _ => Err(format!("unrecognised color '{}'", name)),
    }
}
