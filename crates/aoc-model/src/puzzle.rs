use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{date, Error};

/// Host serving the puzzles.
pub const SITE: &str = "adventofcode.com";

/// One puzzle as seen by one user.
///
/// The URL and cache location are derived from `(year, day, token)` on demand,
/// so two identities with equal fields always point at the same page and the
/// same cached input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PuzzleIdentity {
    year: i32,
    day: u32,
    /// Session cookie value. Never serialized.
    #[serde(skip_serializing)]
    token: String,
}

impl PuzzleIdentity {
    /// Fails with [`Error::InvalidDay`] unless `day` is in `1..=25`, and with
    /// [`Error::InvalidToken`] unless the token is usable as a single path
    /// component.
    pub fn new(year: i32, day: u32, token: impl Into<String>) -> Result<Self, Error> {
        if !(1..=date::LAST_PUZZLE_DAY).contains(&day) {
            return Err(Error::InvalidDay(day));
        }
        let token = token.into();
        if !is_valid_token(&token) {
            return Err(Error::InvalidToken);
        }
        Ok(Self { year, day, token })
    }

    /// Fill in a missing year or day from `now`.
    ///
    /// The day is only looked up when not given, so an explicit day works
    /// outside December.
    pub fn resolve(
        year: Option<i32>,
        day: Option<u32>,
        token: impl Into<String>,
        now: &DateTime<Tz>,
    ) -> Result<Self, Error> {
        let year = year.unwrap_or_else(|| date::puzzle_year_at(now));
        let day = match day {
            Some(day) => day,
            None => date::puzzle_day_at(now)?,
        };
        Self::new(year, day, token)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Puzzle page, e.g. `https://adventofcode.com/2019/day/7`.
    pub fn url(&self) -> String {
        format!("https://{SITE}/{}/day/{}", self.year, self.day)
    }

    pub fn input_url(&self) -> String {
        format!("{}/input", self.url())
    }

    pub fn answer_url(&self) -> String {
        format!("{}/answer", self.url())
    }

    /// `<root>/<token>/<year>/<dd>.txt`
    pub fn cache_path(&self, root: &Path) -> PathBuf {
        root.join(&self.token)
            .join(self.year.to_string())
            .join(format!("{:02}.txt", self.day))
    }
}

/// The token names the cache directory, so it must not be empty or navigate.
fn is_valid_token(token: &str) -> bool {
    !token.is_empty()
        && token != "."
        && token != ".."
        && !token.contains(['/', '\\', '\0'])
}

impl fmt::Display for PuzzleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {:02}", self.year, self.day)
    }
}
