use crate::celebration::Celebration;
use crate::errors::AppError;
use crate::models::Theme;
use crate::storage::{decode_tasks, encode_tasks, LocalStorage, TASKS_KEY, THEME_KEY};
use crate::store::TaskStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything the page reflects. `storage` is only brought up to date by
/// [`AppData::sync`], which every mutation must call before persisting.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub store: TaskStore,
    pub theme: Theme,
    pub week_offset: i64,
    pub storage: LocalStorage,
}

impl AppData {
    pub fn from_storage(storage: LocalStorage) -> Self {
        Self {
            store: TaskStore::new(decode_tasks(storage.get(TASKS_KEY))),
            theme: Theme::parse_or_default(storage.get(THEME_KEY)),
            week_offset: 0,
            storage,
        }
    }

    pub fn sync(&mut self) -> Result<(), AppError> {
        let tasks = encode_tasks(self.store.tasks())?;
        self.storage.set(TASKS_KEY, tasks);
        self.storage.set(THEME_KEY, self.theme.as_str());
        Ok(())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub celebration: Celebration,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            celebration: Celebration::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, TaskDraft};
    use crate::week::week_start_at;
    use chrono::NaiveDate;

    #[test]
    fn sync_writes_tasks_and_theme_into_storage() {
        let mut data = AppData::default();
        let start = week_start_at(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(), 0);
        data.store.add(
            TaskDraft {
                text: "Buy milk".into(),
                day: DayOfWeek::Monday,
                time: None,
                repeat_weekly: false,
            },
            start,
            1,
        );
        data.theme = Theme::Dark;
        data.sync().unwrap();

        let reloaded = AppData::from_storage(data.storage.clone());
        assert_eq!(reloaded.store, data.store);
        assert_eq!(reloaded.theme, Theme::Dark);
        assert_eq!(reloaded.week_offset, 0);
    }

    #[test]
    fn malformed_tasks_key_starts_empty() {
        let mut storage = LocalStorage::default();
        storage.set(TASKS_KEY, "not json");
        let data = AppData::from_storage(storage);
        assert!(data.store.is_empty());
        assert_eq!(data.theme, Theme::Light);
    }
}
