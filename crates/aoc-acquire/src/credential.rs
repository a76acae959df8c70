use std::path::Path;

use crate::{Error, Result};

/// Resolve the session cookie.
///
/// A value taken from the environment (or the command line) wins as soon as it
/// is present. Otherwise the token file is read and trimmed.
pub fn resolve_token(env_value: Option<String>, token_file: &Path) -> Result<String> {
    if let Some(token) = env_value {
        tracing::debug!("Using session cookie from environment");
        return Ok(token);
    }

    let missing = || Error::MissingCredential {
        path: token_file.to_path_buf(),
    };

    let contents = match std::fs::read_to_string(token_file) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing()),
        Err(e) => return Err(e.into()),
    };

    let token = contents.trim();
    if token.is_empty() {
        return Err(missing());
    }

    tracing::debug!(path = %token_file.display(), "Using session cookie from token file");
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_wins() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("token");
        std::fs::write(&file, "from-file").unwrap();

        let token = resolve_token(Some("from-env".into()), &file).unwrap();
        assert_eq!(token, "from-env");
    }

    #[test]
    fn test_empty_env_value_still_wins() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("token");
        std::fs::write(&file, "from-file").unwrap();

        assert_eq!(resolve_token(Some(String::new()), &file).unwrap(), "");
    }

    #[test]
    fn test_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("token");
        std::fs::write(&file, "  abc123\n\n").unwrap();

        assert_eq!(resolve_token(None, &file).unwrap(), "abc123");
    }

    #[test]
    fn test_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("token");

        let err = resolve_token(None, &file).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { ref path } if *path == file));

        std::fs::write(&file, "   \n").unwrap();
        let err = resolve_token(None, &file).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { .. }));
    }
}
