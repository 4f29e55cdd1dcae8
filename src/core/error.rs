// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Errors raised while turning user input into timer events.
///
/// Timer transitions themselves never fail; only requests can be malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The duration text could not be understood.
    InvalidDuration(String),

    /// Focus was requested for a body that is not in the scene.
    UnknownBody(String),

    /// The IPC command is not one the daemon knows.
    UnknownCommand(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDuration(s) =>
                write!(f, "invalid duration '{s}' (use SS, MM:SS, HH:MM:SS or e.g. 1h30m)"),
            Error::UnknownBody(id) =>
                write!(f, "unknown body '{id}'"),
            Error::UnknownCommand(cmd) =>
                write!(f, "unknown command '{cmd}'"),
        }
    }
}

impl std::error::Error for Error {}
