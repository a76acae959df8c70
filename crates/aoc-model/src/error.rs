use thiserror::Error;

/// Errors raised while building puzzle values from user input or the clock.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Puzzles are only released in December.
    #[error("must be December to resolve today's puzzle (current month: {month})")]
    OutOfSeason { month: u32 },

    #[error("day {0} is out of range, puzzles run from day 1 to 25")]
    InvalidDay(u32),

    #[error("session cookie must be non-empty and contain no path separators")]
    InvalidToken,

    #[error("submit level must be 1 or 2, got {0}")]
    InvalidLevel(i64),
}
