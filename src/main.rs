mod cue;
mod error;
mod parser;
mod player;
mod scheduler;
mod screen;

use crate::parser::Parser;
use crate::scheduler::Scheduler;
use crate::screen::{Position, Screen};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use crossterm::style::Color;

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Display timed bilingual subtitles over the terminal")]
struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        help = "Path to the subtitle file. One cue per line: HH:MM:SS.sss <primary>|<secondary>."
    )]
    file: String,
    #[arg(
        long,
        value_name = "NAME",
        default_value = "white",
        value_parser = screen::parse_color,
        help = "Subtitle text color: a color name, or #RRGGBB."
    )]
    color: Color,
    #[arg(
        long,
        value_enum,
        default_value = "bottom",
        help = "Where on the screen the subtitles appear."
    )]
    position: Position,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let data = std::fs::read_to_string(&cli.file)
        .context(format!("Failed to open subtitle file: '{}'", cli.file))?;

    let mut parser = Parser::new();
    let cues = parser.parse(&data);

    let scheduler = Scheduler::new(cues);
    let screen = Screen::open(cli.color, cli.position)?;
    player::run(scheduler, screen)
}
