use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const SOLUTION_TEMPLATE: &str = include_str!("../templates/solution.rs.tmpl");
const TEST_TEMPLATE: &str = include_str!("../templates/test_solution.rs.tmpl");

/// Directory, relative to the base directory, holding template overrides.
pub const OVERRIDE_DIR: &str = ".aoc";

/// Files written for one puzzle day.
#[derive(Debug, Clone)]
pub struct DayWorkspace {
    pub dir: PathBuf,
    pub solution: PathBuf,
    pub test: PathBuf,
    pub input: PathBuf,
}

/// Create the working directory for `day` under `base_dir`.
///
/// Writes into `{base_dir}/{dd}/`:
/// - `solution.rs`: solution template
/// - `test_day{dd}.rs`: test template
/// - `input.txt`: the puzzle input, verbatim
///
/// `{base_dir}/.aoc/solution.rs` and `{base_dir}/.aoc/test_solution.rs` replace
/// the built-in templates when present. Fails if the day already has a
/// solution file.
pub fn generate_day(base_dir: &Path, day: u32, puzzle_input: &str) -> Result<DayWorkspace> {
    let name = format!("{day:02}");
    let dir = base_dir.join(&name);
    let solution = dir.join("solution.rs");

    if solution.exists() {
        anyhow::bail!("day {name} already found at {}", dir.display());
    }

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let overrides = base_dir.join(OVERRIDE_DIR);

    let contents = template(&overrides.join("solution.rs"), SOLUTION_TEMPLATE)?;
    fs::write(&solution, contents)?;
    tracing::info!(path = %solution.display(), "Wrote solution template");

    let test = dir.join(format!("test_day{name}.rs"));
    let contents = template(&overrides.join("test_solution.rs"), TEST_TEMPLATE)?;
    fs::write(&test, contents)?;
    tracing::info!(path = %test.display(), "Wrote test template");

    let input = dir.join("input.txt");
    fs::write(&input, puzzle_input)?;
    tracing::info!(path = %input.display(), lines = puzzle_input.lines().count(), "Wrote puzzle input");

    Ok(DayWorkspace {
        dir,
        solution,
        test,
        input,
    })
}

/// Project override if present, built-in template otherwise.
fn template(override_path: &Path, builtin: &str) -> Result<String> {
    if override_path.is_file() {
        tracing::debug!(path = %override_path.display(), "Using template override");
        return fs::read_to_string(override_path)
            .with_context(|| format!("Failed to read {}", override_path.display()));
    }
    Ok(builtin.to_string())
}
