use std::path::{Path, PathBuf};
use std::time::SystemTime;

use uuid::Uuid;

use super::{insert_task, remove_task, replace_task, StoreError, TaskStore};
use crate::model::{Schedule, Task};

const FILE_NAME: &str = "schedule.json";

/// Keeps the whole schedule in one pretty-printed JSON file and rewrites it on
/// every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    schedule: Schedule,
    /// Modification time seen at our last read or write.
    seen_modified: Option<SystemTime>,
}

impl JsonFileStore {
    /// `schedule.json` in the per-user data directory.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        directories::ProjectDirs::from("", "", "BuildPlan")
            .map(|dirs| dirs.data_dir().join(FILE_NAME))
            .ok_or(StoreError::NoDataDir)
    }

    /// Open the file at `path`, writing the demo schedule there first if it
    /// does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if path.exists() {
            let schedule = load_schedule(&path)?;
            tracing::info!(path = %path.display(), tasks = schedule.tasks.len(), "schedule loaded");
            let seen_modified = modified(&path);
            return Ok(Self {
                path,
                schedule,
                seen_modified,
            });
        }

        tracing::info!(path = %path.display(), "no schedule file, seeding demo data");
        let mut store = Self {
            path,
            schedule: Schedule::sample(),
            seen_modified: None,
        };
        store.write()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&mut self) -> Result<(), StoreError> {
        save_schedule(&self.schedule, &self.path)?;
        self.seen_modified = modified(&self.path);
        tracing::debug!(path = %self.path.display(), "schedule written");
        Ok(())
    }

    /// Apply `change` and persist it. The in-memory copy is left untouched if
    /// either step fails.
    fn mutate<T>(
        &mut self,
        change: impl FnOnce(&mut Schedule) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let previous = self.schedule.clone();
        let result = change(&mut self.schedule).and_then(|value| self.write().map(|()| value));
        if result.is_err() {
            self.schedule = previous;
        }
        result
    }
}

impl TaskStore for JsonFileStore {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn create_task(&mut self, task: Task) -> Result<Uuid, StoreError> {
        self.mutate(|schedule| Ok(insert_task(schedule, task)))
    }

    fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
        let id = task.id;
        self.mutate(|schedule| replace_task(schedule, task))?;
        tracing::info!(task = %id, "task updated");
        Ok(())
    }

    fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        self.mutate(|schedule| remove_task(schedule, id))?;
        tracing::info!(task = %id, "task deleted");
        Ok(())
    }

    fn poll_changes(&mut self) -> Result<bool, StoreError> {
        let current = modified(&self.path);
        if current.is_none() || current == self.seen_modified {
            return Ok(false);
        }
        self.schedule = load_schedule(&self.path)?;
        self.seen_modified = current;
        tracing::info!(path = %self.path.display(), "schedule changed on disk, reloaded");
        Ok(true)
    }

    fn describe(&self) -> String {
        format!("Local file: {}", self.path.display())
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Save a schedule to a JSON file, creating parent directories as needed.
pub fn save_schedule(schedule: &Schedule, path: &Path) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(schedule).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)
}

/// Load a schedule from a JSON file.
pub fn load_schedule(path: &Path) -> Result<Schedule, StoreError> {
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
