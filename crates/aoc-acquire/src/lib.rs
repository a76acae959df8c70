use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub mod credential;
pub mod input;
pub mod session;
pub mod submit;

pub use credential::resolve_token;
pub use input::InputCache;
pub use session::{AuthSession, HttpResponse, Transport};
pub use submit::{classify, submit};

/// Environment variable holding the session cookie.
pub const SESSION_COOKIE_ENV: &str = "AOC_SESSION_COOKIE";

/// Environment variable overriding the input cache directory.
pub const CACHE_DIR_ENV: &str = "AOC_CACHE_DIR";

#[derive(Debug, Error)]
pub enum Error {
    #[error("no session cookie: set {} or write it to {}", SESSION_COOKIE_ENV, .path.display())]
    MissingCredential { path: PathBuf },

    #[error("session cookie is not a valid header value")]
    InvalidCookie,

    #[error("got {status} fetching puzzle input: {body}")]
    Fetch { status: u16, body: String },

    #[error("got {status} submitting answer: {body}")]
    Submit { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] aoc_model::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

const USER_AGENT: &str = concat!("aoc/", env!("CARGO_PKG_VERSION"), " (puzzle workspace tool)");

/// Locations and HTTP settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the puzzle input cache.
    pub cache_root: PathBuf,
    /// File holding the session cookie when the environment does not.
    pub token_file: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Config {
    /// Everything lives under `<home>/.config/aocd`.
    pub fn from_home(home: PathBuf) -> Self {
        let config_dir = home.join(".config").join("aocd");
        Self {
            token_file: config_dir.join("token"),
            cache_root: config_dir,
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_home(dirs::home_dir().unwrap_or_default())
    }
}
