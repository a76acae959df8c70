use aoc_model::PuzzleIdentity;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::{Error, Result, Transport};

/// Read-through cache of puzzle inputs on the local filesystem.
///
/// Inputs never change once published, so a cached file is trusted as is and
/// never rewritten.
#[derive(Debug, Clone)]
pub struct InputCache {
    root: PathBuf,
}

impl InputCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, puzzle: &PuzzleIdentity) -> PathBuf {
        puzzle.cache_path(&self.root)
    }

    /// Return the puzzle input, fetching it on a cache miss.
    pub async fn get_input<T>(&self, puzzle: &PuzzleIdentity, transport: &T) -> Result<String>
    where
        T: Transport + Sync + ?Sized,
    {
        let path = self.path_for(puzzle);
        if path.is_file() {
            tracing::info!(puzzle = %puzzle, path = %path.display(), "Using cached puzzle input");
            return Ok(fs::read_to_string(&path)?);
        }

        let text = fetch_input(puzzle, transport).await?;
        self.store(&path, &text)?;
        tracing::info!(
            puzzle = %puzzle,
            path = %path.display(),
            bytes = text.len(),
            "Cached puzzle input"
        );
        Ok(text)
    }

    /// Write `text` to a temporary sibling and move it into place, so `path`
    /// only ever appears complete. Never replaces an existing file.
    fn store(&self, path: &Path, text: &str) -> Result<()> {
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(text.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist_noclobber(path).map_err(|e| e.error)?;
        Ok(())
    }
}

async fn fetch_input<T>(puzzle: &PuzzleIdentity, transport: &T) -> Result<String>
where
    T: Transport + Sync + ?Sized,
{
    let url = puzzle.input_url();
    tracing::info!(url = %url, "Fetching puzzle input");
    let response = transport.get(&url).await?;

    if !response.is_success() {
        tracing::error!(status = response.status, url = %url, "Failed to fetch puzzle input");
        tracing::error!("{}", response.body);
        return Err(Error::Fetch {
            status: response.status,
            body: response.body,
        });
    }

    // The site sometimes double-terminates the last line
    Ok(response.body.trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::{Call, MockTransport};

    const COOKIE: &str = "12345";

    fn puzzle(year: i32, day: u32) -> PuzzleIdentity {
        PuzzleIdentity::new(year, day, COOKIE).unwrap()
    }

    #[tokio::test]
    async fn test_miss_fetches_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2019, 10);
        let transport = MockTransport::new().respond(200, &p.input_url(), "some text");

        let text = cache.get_input(&p, &transport).await.unwrap();

        assert_eq!(text, "some text");
        assert_eq!(
            transport.calls(),
            vec![Call::Get("https://adventofcode.com/2019/day/10/input".into())]
        );
        let cached = dir.path().join(COOKIE).join("2019").join("10.txt");
        assert_eq!(fs::read_to_string(cached).unwrap(), "some text");
    }

    #[tokio::test]
    async fn test_second_call_is_a_hit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2019, 10);

        let first = MockTransport::new().respond(200, &p.input_url(), "1\n2\n3\n");
        cache.get_input(&p, &first).await.unwrap();
        assert_eq!(first.calls().len(), 1);

        // No responses queued: any request would panic
        let second = MockTransport::new();
        let text = cache.get_input(&p, &second).await.unwrap();
        assert_eq!(text, "1\n2\n3\n");
        assert!(second.calls().is_empty());
    }

    #[tokio::test]
    async fn test_existing_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2018, 3);
        let path = cache.path_for(&p);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "seeded").unwrap();

        let transport = MockTransport::new();
        assert_eq!(cache.get_input(&p, &transport).await.unwrap(), "seeded");
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trailing_carriage_returns_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2019, 1);
        let transport = MockTransport::new().respond(200, &p.input_url(), "12\n34\r\r");

        let text = cache.get_input(&p, &transport).await.unwrap();
        assert_eq!(text, "12\n34");
        assert_eq!(fs::read_to_string(cache.path_for(&p)).unwrap(), "12\n34");
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2019, 25);
        let transport = MockTransport::new().respond(
            400,
            &p.input_url(),
            "Puzzle inputs differ by user.  Please log in to get your puzzle input.",
        );

        let err = cache.get_input(&p, &transport).await.unwrap_err();
        match err {
            Error::Fetch { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Please log in"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
        assert!(!cache.path_for(&p).exists());
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn test_store_never_replaces_existing_input() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let path = cache.path_for(&puzzle(2019, 9));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "complete input").unwrap();

        assert!(cache.store(&path, "other").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "complete input");
        // The failed write leaves nothing behind next to the cached file
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failed_store_leaves_no_input() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2019, 9);
        let path = cache.path_for(&p);
        // A directory where the file should go makes the final move fail
        fs::create_dir_all(&path).unwrap();

        assert!(cache.store(&path, "some text").is_err());
        assert!(!path.is_file());
        let year_dir = path.parent().unwrap();
        let entries: Vec<_> = fs::read_dir(year_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries, vec![path.clone()]);
    }

    #[tokio::test]
    async fn test_store_is_complete_or_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let p = puzzle(2019, 9);
        let big = "1234567890\n".repeat(10_000);
        let transport = MockTransport::new().respond(200, &p.input_url(), &big);

        cache.get_input(&p, &transport).await.unwrap();

        let year_dir = cache.path_for(&p).parent().unwrap().to_path_buf();
        let names: Vec<_> = fs::read_dir(&year_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("09.txt")]);
        assert_eq!(fs::read_to_string(cache.path_for(&p)).unwrap(), big);
    }

    #[tokio::test]
    async fn test_tokens_do_not_share_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let cache = InputCache::new(dir.path());
        let alice = PuzzleIdentity::new(2019, 5, "alice").unwrap();
        let bob = PuzzleIdentity::new(2019, 5, "bob").unwrap();

        let transport = MockTransport::new()
            .respond(200, &alice.input_url(), "alice input")
            .respond(200, &bob.input_url(), "bob input");

        assert_eq!(cache.get_input(&alice, &transport).await.unwrap(), "alice input");
        assert_eq!(cache.get_input(&bob, &transport).await.unwrap(), "bob input");
        assert_eq!(transport.calls().len(), 2);
    }
}
