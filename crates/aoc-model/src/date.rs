//! Puzzle calendar: which year and day are "current" on the site.
//!
//! Puzzles unlock at midnight US Eastern time, one per day from December 1st
//! to December 25th, so all calendar logic runs in that timezone.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::{America::New_York, Tz};

use crate::Error;

/// Last day of the month that has a puzzle.
pub const LAST_PUZZLE_DAY: u32 = 25;

/// The site's reference timezone.
pub const PUZZLE_TZ: Tz = New_York;

/// Current wall-clock time in the puzzle timezone.
pub fn now() -> DateTime<Tz> {
    Utc::now().with_timezone(&PUZZLE_TZ)
}

/// The most recent puzzle year available.
pub fn current_year() -> i32 {
    puzzle_year_at(&now())
}

/// Today's puzzle day, clamped to the last puzzle day.
pub fn current_day() -> Result<u32, Error> {
    puzzle_day_at(&now())
}

/// Before December the newest season is last year's.
pub fn puzzle_year_at(now: &DateTime<Tz>) -> i32 {
    if now.month() < 12 {
        now.year() - 1
    } else {
        now.year()
    }
}

pub fn puzzle_day_at(now: &DateTime<Tz>) -> Result<u32, Error> {
    if now.month() != 12 {
        return Err(Error::OutOfSeason { month: now.month() });
    }
    Ok(now.day().min(LAST_PUZZLE_DAY))
}
