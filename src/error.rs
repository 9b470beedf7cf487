use std::{error::Error as StdError, fmt};

use crate::model::mode::GameMode;

/// `Result<_, Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// Anything that could go wrong when setting up a calculation.
///
/// None of these can occur during the calculation itself, every pass over
/// well-formed input runs to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bounded queue was requested without any capacity.
    InvalidCapacity,
    /// Indexed access past the end of a queue.
    IndexOutOfBounds { idx: usize, len: usize },
    /// The beatmap cannot be converted to the requested mode.
    IncompatibleMode { from: GameMode, to: GameMode },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => f.write_str("queue capacity must be greater than zero"),
            Self::IndexOutOfBounds { idx, len } => {
                write!(f, "index {idx} is out of bounds for queue of length {len}")
            }
            Self::IncompatibleMode { from, to } => {
                write!(f, "cannot convert a beatmap from {from:?} to {to:?}")
            }
        }
    }
}

impl StdError for Error {}
