use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum OversubError {
    FormatError(String),
}

impl Error for OversubError {}

impl fmt::Display for OversubError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OversubError::FormatError(msg) => write!(fmt, "{}", msg),
        }
    }
}
