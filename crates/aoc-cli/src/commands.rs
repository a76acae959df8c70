use anyhow::Result;
use aoc_acquire::{InputCache, Transport};
use aoc_model::{PuzzleIdentity, Submission};
use aoc_scaffold::DayWorkspace;
use chrono::DateTime;
use chrono_tz::Tz;
use std::path::Path;

/// Build the puzzle from command-line values, defaulting year and day from
/// `now` and the cookie from the token file.
pub fn resolve_puzzle(
    year: Option<i32>,
    day: Option<u32>,
    session_cookie: Option<String>,
    token_file: &Path,
    now: &DateTime<Tz>,
) -> Result<PuzzleIdentity> {
    let token = aoc_acquire::resolve_token(session_cookie, token_file)?;
    Ok(PuzzleIdentity::resolve(year, day, token, now)?)
}

/// Fetch (or reuse) the input and scaffold the day under `dir`.
pub async fn begin<T>(
    transport: &T,
    puzzle: &PuzzleIdentity,
    cache: &InputCache,
    dir: &Path,
) -> Result<DayWorkspace>
where
    T: Transport + Sync + ?Sized,
{
    tracing::info!(puzzle = %puzzle, "Initialising puzzle");
    let input = cache.get_input(puzzle, transport).await?;
    let workspace = aoc_scaffold::generate_day(dir, puzzle.day(), &input)?;
    tracing::info!(path = %workspace.dir.display(), "Puzzle workspace ready");
    Ok(workspace)
}

/// Submit an answer. Known verdicts are returned, an unrecognised page is an
/// error.
pub async fn submit<T>(
    transport: &T,
    puzzle: &PuzzleIdentity,
    answer: &str,
    level: i64,
) -> Result<Submission>
where
    T: Transport + Sync + ?Sized,
{
    let submission = aoc_acquire::submit(transport, puzzle, answer, level).await?;
    if !submission.outcome.is_recognised() {
        anyhow::bail!("{}", submission.summary());
    }
    Ok(submission)
}
