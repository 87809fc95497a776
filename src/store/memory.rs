use uuid::Uuid;

use super::{insert_task, remove_task, replace_task, StoreError, TaskStore};
use crate::model::{Schedule, Task};

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    schedule: Schedule,
}

impl MemoryStore {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule }
    }
}

impl TaskStore for MemoryStore {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn create_task(&mut self, task: Task) -> Result<Uuid, StoreError> {
        Ok(insert_task(&mut self.schedule, task))
    }

    fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
        replace_task(&mut self.schedule, task)
    }

    fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        remove_task(&mut self.schedule, id)
    }

    fn describe(&self) -> String {
        "In-memory (changes are not saved)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::add_days;

    #[test]
    fn update_replaces_record() {
        let mut store = MemoryStore::new(Schedule::sample());
        let mut task = store.schedule().tasks[0].clone();
        task.end = add_days(task.end, 3);
        store.update_task(task.clone()).unwrap();
        assert_eq!(store.schedule().task(task.id), Some(&task));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut store = MemoryStore::default();
        let task = Schedule::sample().tasks[0].clone();
        let id = task.id;
        assert!(matches!(store.update_task(task), Err(StoreError::NotFound(missing)) if missing == id));
        assert!(matches!(store.delete_task(id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn create_then_delete() {
        let mut store = MemoryStore::default();
        let task = Schedule::sample().tasks[0].clone();
        let id = store.create_task(task.clone()).unwrap();
        assert_eq!(id, task.id);

        let dup = store.create_task(task).unwrap();
        assert_ne!(dup, id);
        assert_eq!(store.schedule().tasks.len(), 2);

        store.delete_task(id).unwrap();
        assert_eq!(store.schedule().tasks.len(), 1);
        assert!(!store.poll_changes().unwrap());
    }
}
