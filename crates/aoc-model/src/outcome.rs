use serde::Serialize;
use std::fmt;

use crate::{Error, PuzzleIdentity};

/// Puzzle part. Each day has two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Level {
    One,
    Two,
}

impl TryFrom<i64> for Level {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            other => Err(Error::InvalidLevel(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        match level {
            Level::One => 1,
            Level::Two => 2,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// What the site said about a submitted answer.
///
/// Every variant except `Correct` keeps the text it was recognised from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Correct,
    /// This level was solved earlier.
    AlreadySubmitted { message: String },
    Incorrect { message: String },
    /// The site refuses answers for a while after a wrong one.
    RateLimited { message: String },
    /// Response did not match any known page. Carries the raw response body.
    Unparseable { raw: String },
}

impl SubmissionOutcome {
    /// True for the outcomes the site is known to produce.
    pub fn is_recognised(&self) -> bool {
        !matches!(self, SubmissionOutcome::Unparseable { .. })
    }
}

/// A submitted answer and the site's verdict on it.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub puzzle: PuzzleIdentity,
    pub level: Level,
    pub answer: String,
    #[serde(flatten)]
    pub outcome: SubmissionOutcome,
    /// Final URL after redirects, the page showing the verdict.
    pub redirect_url: String,
}

impl Submission {
    /// One-line, human readable verdict.
    pub fn summary(&self) -> String {
        let Submission {
            puzzle,
            level,
            answer,
            ..
        } = self;
        match &self.outcome {
            SubmissionOutcome::Correct => {
                format!("{puzzle} level {level}: correct answer {answer}")
            }
            SubmissionOutcome::AlreadySubmitted { .. } => {
                format!("{puzzle} level {level} is already complete")
            }
            SubmissionOutcome::Incorrect { .. } => {
                format!("Incorrect answer {answer} for {puzzle} level {level}")
            }
            SubmissionOutcome::RateLimited { message } => message.trim().to_string(),
            SubmissionOutcome::Unparseable { raw } => {
                format!("Unable to parse submission response text: {raw}")
            }
        }
    }
}
