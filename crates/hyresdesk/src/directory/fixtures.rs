use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Failure to load a JSON array of records exported from the back office API.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_json<T, P>(path: P) -> Result<Vec<T>, FixtureError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })
}
