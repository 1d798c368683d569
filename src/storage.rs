use crate::errors::AppError;
use crate::models::Task;
use std::collections::BTreeMap;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const TASKS_KEY: &str = "tasks";
pub const VERSION_KEY: &str = "app_version";
pub const THEME_KEY: &str = "theme";

/// Bumping the package version discards everything previously stored.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/storage.json"))
}

/// String-keyed, string-valued store persisted as one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalStorage {
    entries: BTreeMap<String, String>,
}

impl LocalStorage {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPolicy {
    /// Any difference between the stored and running version drops all keys.
    WipeOnVersionMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    UpToDate,
    Wiped { previous: Option<String> },
}

impl MigrationPolicy {
    pub fn apply(self, storage: &mut LocalStorage, running: &str) -> MigrationOutcome {
        match self {
            MigrationPolicy::WipeOnVersionMismatch => {
                let stored = storage.get(VERSION_KEY).map(str::to_owned);
                if stored.as_deref() == Some(running) {
                    return MigrationOutcome::UpToDate;
                }
                storage.clear();
                storage.set(VERSION_KEY, running);
                MigrationOutcome::Wiped { previous: stored }
            }
        }
    }
}

/// Anything other than a valid JSON array of tasks reads as "no tasks".
pub fn decode_tasks(raw: Option<&str>) -> Vec<Task> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("ignoring malformed stored tasks: {err}");
            Vec::new()
        }
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, AppError> {
    serde_json::to_string(tasks).map_err(AppError::internal)
}

pub async fn load_storage(path: &Path) -> LocalStorage {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => LocalStorage { entries },
            Err(err) => {
                error!("failed to parse storage file: {err}");
                LocalStorage::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => LocalStorage::default(),
        Err(err) => {
            error!("failed to read storage file: {err}");
            LocalStorage::default()
        }
    }
}

/// Loads the storage file and applies the version policy before anything
/// reads from it.
pub async fn open_storage(path: &Path, policy: MigrationPolicy) -> LocalStorage {
    let mut storage = load_storage(path).await;
    if let MigrationOutcome::Wiped { previous } = policy.apply(&mut storage, APP_VERSION) {
        info!(
            previous = previous.as_deref().unwrap_or("none"),
            current = APP_VERSION,
            "storage version changed, starting fresh"
        );
    }
    storage
}

pub async fn persist_storage(path: &Path, storage: &LocalStorage) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(&storage.entries).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
