//! Persistence behind one interface. The timeline only ever talks to
//! [`TaskStore`]; which backend sits behind it is decided once at startup.

pub mod json;
pub mod memory;

use std::path::PathBuf;

use uuid::Uuid;

use crate::config::{Settings, StoreBackend};
use crate::model::{Schedule, Task};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed schedule file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no task with id {0}")]
    NotFound(Uuid),
    #[error("could not determine a data directory")]
    NoDataDir,
}

/// Create, update and delete task records, and report external changes.
pub trait TaskStore {
    /// Current projects, subcontractors and tasks.
    fn schedule(&self) -> &Schedule;

    fn create_task(&mut self, task: Task) -> Result<Uuid, StoreError>;

    /// Replace the record with the same id.
    fn update_task(&mut self, task: Task) -> Result<(), StoreError>;

    fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError>;

    /// Pick up changes made outside this process. Returns true if the
    /// schedule was reloaded.
    fn poll_changes(&mut self) -> Result<bool, StoreError> {
        Ok(false)
    }

    /// Short human-readable description for the status bar.
    fn describe(&self) -> String;
}

/// Open the backend named in `settings`.
pub fn open_store(settings: &Settings) -> Result<Box<dyn TaskStore>, StoreError> {
    match settings.backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            Ok(Box::new(MemoryStore::new(Schedule::sample())))
        }
        StoreBackend::Json => {
            let path = match &settings.data_file {
                Some(path) => path.clone(),
                None => JsonFileStore::default_path()?,
            };
            Ok(Box::new(JsonFileStore::open(path)?))
        }
    }
}

pub(crate) fn replace_task(schedule: &mut Schedule, task: Task) -> Result<(), StoreError> {
    let slot = schedule
        .tasks
        .iter_mut()
        .find(|t| t.id == task.id)
        .ok_or(StoreError::NotFound(task.id))?;
    *slot = task;
    Ok(())
}

pub(crate) fn remove_task(schedule: &mut Schedule, id: Uuid) -> Result<(), StoreError> {
    let before = schedule.tasks.len();
    schedule.tasks.retain(|t| t.id != id);
    if schedule.tasks.len() == before {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}

/// Append `task`, giving it a fresh id if its id is already taken.
pub(crate) fn insert_task(schedule: &mut Schedule, mut task: Task) -> Uuid {
    if schedule.task(task.id).is_some() {
        task.id = Uuid::new_v4();
    }
    let id = task.id;
    schedule.tasks.push(task);
    id
}
