use crate::cue::Cue;
use crate::error::OversubError;

use std::time::Duration;

use nom::bytes::complete::tag;
use nom::character::complete::{digit0, digit1};
use nom::combinator::{map_res, opt, recognize};
use nom::error::VerboseError;
use nom::sequence::pair;
use nom::{Err, IResult};

pub struct Parser;
impl Parser {
    pub fn new() -> Self {
        Self {}
    }

    /// Parses the contents of a subtitle file into a cue sequence.
    ///
    /// Cues are returned in file order, without sorting or deduplication.
    /// Malformed lines are skipped with a diagnostic on stderr; a single bad
    /// line never aborts the load.
    pub fn parse(&mut self, input: &str) -> Vec<Cue> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);

        let mut cues = Vec::new();
        for (num, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match cue_line(line) {
                Ok(cue) => cues.push(cue),
                Err(err) => eprintln!("Skipping line {}: {}", num + 1, err),
            }
        }
        cues
    }
}

/// Parses one `HH:MM:SS.sss <primary>|<secondary>` line.
fn cue_line(line: &str) -> Result<Cue, OversubError> {
    let (time, text) = line
        .split_once(' ')
        .ok_or_else(|| OversubError::FormatError("no text after the timestamp".to_string()))?;
    let show_at = parse_timestamp(time)?;
    let (primary, secondary) = text.split_once('|').ok_or_else(|| {
        OversubError::FormatError("no `|` between primary and secondary text".to_string())
    })?;

    Ok(Cue {
        show_at,
        primary: primary.trim().to_string(),
        secondary: secondary.trim().to_string(),
    })
}

fn parse_timestamp(token: &str) -> Result<Duration, OversubError> {
    match timestamp(token) {
        Ok(("", duration)) => Ok(duration),
        Ok((_, _)) | Err(Err::Error(_)) | Err(Err::Failure(_)) => Err(OversubError::FormatError(
            format!("'{}' is not a HH:MM:SS.sss timestamp", token),
        )),
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    }
}

fn timestamp(input: &str) -> IResult<&str, Duration, VerboseError<&str>> {
    let (input, hours): (_, u64) = number(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, minutes) = number(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, seconds) = seconds(input)?;

    let millis = (((hours * 3600 + minutes * 60) as f64 + seconds) * 1000.0) as u64;
    Ok((input, Duration::from_millis(millis)))
}

fn number(input: &str) -> IResult<&str, u64, VerboseError<&str>> {
    map_res(digit1, |s: &str| s.parse())(input)
}

fn seconds(input: &str) -> IResult<&str, f64, VerboseError<&str>> {
    // The seconds field may carry a fractional part, but does not have to.
    map_res(
        recognize(pair(digit1, opt(pair(tag("."), digit0)))),
        |s: &str| s.parse(),
    )(input)
}
