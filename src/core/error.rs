// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Failures parsing user input for the countdown binary.
///
/// Timer operations themselves never fail; they report `(Duration, bool)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace.
    Empty,

    /// A number without a unit, e.g. `"5"`.
    MissingUnit(String),

    InvalidNumber(String),

    /// A unit other than ms, s, m, h (or their long forms).
    UnknownUnit(String),

    /// Durations must be greater than zero.
    Zero,

    UnknownCommand(String),
}

// ---------------- Display ----------------

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty =>
                write!(f, "duration must not be empty"),
            ParseError::MissingUnit(part) =>
                write!(f, "invalid duration format: '{part}' (missing unit)"),
            ParseError::InvalidNumber(num) =>
                write!(f, "invalid number: '{num}'"),
            ParseError::UnknownUnit(unit) =>
                write!(f, "unknown time unit: '{unit}' (use ms, s, m, or h)"),
            ParseError::Zero =>
                write!(f, "duration must be greater than 0"),
            ParseError::UnknownCommand(cmd) =>
                write!(f, "unknown command: '{cmd}' (try 'help')"),
        }
    }
}

impl std::error::Error for ParseError {}
