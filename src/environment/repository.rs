use serde_json::{from_slice, to_string_pretty};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const STORAGE_PATH: &str = "storage.json";

/// Key of the persisted session token
pub const SESSION_TOKEN_KEY: &str = "sessionToken";
/// Key of the persisted root link
pub const LINK_KEY: &str = "link";

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Storage Data Error: {0}")]
    Poisoned(String),
}

/// Durable key/value storage that survives restarts
pub trait Persistence: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    fn remove(&self, key: &str) -> Result<(), RepositoryError>;
}

/// A `Persistence` backed by a json document in a directory. Without a
/// directory it only lives in memory.
#[derive(Clone, Default)]
pub struct Repository {
    path: Option<PathBuf>,
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .finish()
    }
}

impl Repository {
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let directory = directory.as_ref();
        if !directory.exists() {
            std::fs::create_dir_all(directory).map_err(|source| RepositoryError::Io {
                path: directory.to_path_buf(),
                source,
            })?;
        }
        let path = directory.join(STORAGE_PATH);
        let values = read(&path)?.unwrap_or_default();

        // Try to write the values. Otherwise fail early
        write(&path, &values)?;

        Ok(Self {
            path: Some(path),
            values: Arc::new(Mutex::new(values)),
        })
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    /// The platform config directory
    pub fn default_directory() -> Option<PathBuf> {
        use directories_next::ProjectDirs;
        ProjectDirs::from("com", "doer", "doer").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn mutate(
        &self,
        mutation: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), RepositoryError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| RepositoryError::Poisoned(format!("{e:?}")))?;
        mutation(&mut values);
        match self.path {
            Some(ref path) => write(path, &values),
            None => Ok(()),
        }
    }
}

impl Persistence for Repository {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        self.mutate(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        self.mutate(|values| {
            values.remove(key);
        })
    }
}

fn read(path: &Path) -> Result<Option<HashMap<String, String>>, RepositoryError> {
    if !path.exists() {
        return Ok(None);
    };
    let data = std::fs::read(path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = from_slice(&data).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(values))
}

fn write(path: &Path, values: &HashMap<String, String>) -> Result<(), RepositoryError> {
    let data = to_string_pretty(values).map_err(|source| RepositoryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let repository = Repository::in_memory();
        assert_eq!(repository.get(SESSION_TOKEN_KEY), None);
        repository.set(SESSION_TOKEN_KEY, "socooltoken").unwrap();
        assert_eq!(repository.get(SESSION_TOKEN_KEY).as_deref(), Some("socooltoken"));
        repository.remove(SESSION_TOKEN_KEY).unwrap();
        assert_eq!(repository.get(SESSION_TOKEN_KEY), None);
    }

    #[test]
    fn test_values_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let repository = Repository::new(dir.path()).unwrap();
            repository.set(LINK_KEY, "http://some.api/endpoint").unwrap();
            repository.set(SESSION_TOKEN_KEY, "token").unwrap();
            repository.remove(SESSION_TOKEN_KEY).unwrap();
        }
        let repository = Repository::new(dir.path()).unwrap();
        assert_eq!(
            repository.get(LINK_KEY).as_deref(),
            Some("http://some.api/endpoint")
        );
        assert_eq!(repository.get(SESSION_TOKEN_KEY), None);
    }

    #[test]
    fn test_corrupt_storage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORAGE_PATH), "not json").unwrap();
        assert!(matches!(
            Repository::new(dir.path()),
            Err(RepositoryError::Json { .. })
        ));
    }
}
