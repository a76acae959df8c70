use anyhow::Result;
use aoc_acquire::{AuthSession, Config, InputCache};
use aoc_model::{date, PuzzleIdentity};
use chrono::DateTime;
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

mod browser;
mod commands;

#[derive(Parser)]
#[command(name = "aoc")]
#[command(about = "Scaffold, fetch and submit Advent of Code puzzles")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Puzzle input cache directory [default: ~/.config/aocd]
    #[arg(long, global = true, env = aoc_acquire::CACHE_DIR_ENV)]
    cache_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Which puzzle, and as whom. Year and day default to today's puzzle.
#[derive(Args)]
struct PuzzleArgs {
    /// Puzzle year [default: current season]
    #[arg(short, long)]
    year: Option<i32>,

    /// Puzzle day, 1-25 [default: today]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=25))]
    day: Option<u32>,

    /// Session cookie [default: contents of ~/.config/aocd/token]
    #[arg(short = 'c', long, env = aoc_acquire::SESSION_COOKIE_ENV, hide_env_values = true)]
    session_cookie: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a day's input and scaffold its working directory
    Begin {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Directory to create the day directory in
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Do not open the puzzle page in a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Submit an answer for one level of a day's puzzle
    Submit {
        /// The answer to submit
        answer: String,

        /// Puzzle part: 1 or 2
        #[arg(value_parser = clap::value_parser!(i64).range(1..=2))]
        level: i64,

        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Open the result page in a browser
        #[arg(long)]
        open: bool,

        /// Print the submission report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a day's puzzle input, fetching it if not cached
    Input {
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs on stderr keep `aoc input` pipeable
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let mut config = Config {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Config::default()
    };
    if let Some(dir) = cli.cache_dir {
        config.cache_root = dir;
    }

    // One clock read per invocation
    let now = date::now();

    match cli.command {
        Commands::Begin {
            puzzle,
            dir,
            no_browser,
        } => {
            let puzzle = resolve_puzzle(puzzle, &config, &now)?;
            let session = AuthSession::new(puzzle.token(), &config)?;
            let cache = InputCache::new(&config.cache_root);
            commands::begin(&session, &puzzle, &cache, &dir).await?;

            if !no_browser {
                tracing::info!(url = %puzzle.url(), "Opening puzzle page in browser");
                if let Err(e) = browser::open(&puzzle.url()) {
                    tracing::warn!("{e:#}");
                }
            }
        }
        Commands::Submit {
            answer,
            level,
            puzzle,
            open,
            json,
        } => {
            let puzzle = resolve_puzzle(puzzle, &config, &now)?;
            let session = AuthSession::new(puzzle.token(), &config)?;
            let submission = commands::submit(&session, &puzzle, &answer, level).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&submission)?);
            } else {
                println!("{}", submission.summary());
            }

            if open {
                if let Err(e) = browser::open(&submission.redirect_url) {
                    tracing::warn!("{e:#}");
                }
            }
        }
        Commands::Input { puzzle } => {
            let puzzle = resolve_puzzle(puzzle, &config, &now)?;
            let session = AuthSession::new(puzzle.token(), &config)?;
            let input = InputCache::new(&config.cache_root)
                .get_input(&puzzle, &session)
                .await?;
            print!("{input}");
        }
    }

    Ok(())
}

/// Fill in today's year/day and the stored session cookie where not given.
fn resolve_puzzle(
    args: PuzzleArgs,
    config: &Config,
    now: &DateTime<Tz>,
) -> Result<PuzzleIdentity> {
    commands::resolve_puzzle(
        args.year,
        args.day,
        args.session_cookie,
        &config.token_file,
        now,
    )
}
