use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dates;

/// Progress state of a site task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Planned => "Planned",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Display fields of a construction task. The timeline never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteTask {
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub estimated_cost: f64,
}

impl SiteTask {
    pub fn new(project_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: String::new(),
            status: TaskStatus::Planned,
            estimated_cost: 0.0,
        }
    }
}

/// A time-bounded task placed in one row of the timeline.
///
/// `start` and `end` are inclusive calendar days. `group` is the key of the
/// row the task is drawn in (the assigned subcontractor). `payload` is carried
/// through layout and drag edits untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task<P = SiteTask> {
    pub id: Uuid,
    #[serde(rename = "subcontractor_id")]
    pub group: Uuid,
    #[serde(rename = "start_date")]
    pub start: NaiveDate,
    #[serde(rename = "end_date")]
    pub end: NaiveDate,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Task<P> {
    /// Create a task with a fresh id.
    pub fn new(group: Uuid, start: NaiveDate, end: NaiveDate, payload: P) -> Self {
        Self {
            id: Uuid::new_v4(),
            group,
            start,
            end,
            payload,
        }
    }

    /// Inclusive length in days. Inverted spans count as a single day.
    pub fn duration_days(&self) -> i64 {
        dates::diff_in_days(self.end, self.start).max(0) + 1
    }

    /// The same record with a different span.
    pub fn with_span(&self, start: NaiveDate, end: NaiveDate) -> Self
    where
        P: Clone,
    {
        Self {
            id: self.id,
            group: self.group,
            start,
            end,
            payload: self.payload.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        dates::parse_date(s).unwrap()
    }

    #[test]
    fn duration_is_inclusive() {
        let task = Task::new(Uuid::new_v4(), d("2023-10-01"), d("2023-10-05"), ());
        assert_eq!(task.duration_days(), 5);

        let single = Task::new(Uuid::new_v4(), d("2023-10-01"), d("2023-10-01"), ());
        assert_eq!(single.duration_days(), 1);

        let inverted = Task::new(Uuid::new_v4(), d("2023-10-05"), d("2023-10-01"), ());
        assert_eq!(inverted.duration_days(), 1);
    }

    #[test]
    fn with_span_keeps_identity_and_payload() {
        let project = Uuid::new_v4();
        let mut payload = SiteTask::new(project, "Footings");
        payload.estimated_cost = 12_000.0;
        let task = Task::new(Uuid::new_v4(), d("2023-10-13"), d("2023-10-20"), payload);

        let moved = task.with_span(d("2023-10-15"), d("2023-10-22"));
        assert_eq!(moved.id, task.id);
        assert_eq!(moved.group, task.group);
        assert_eq!(moved.payload, task.payload);
        assert_eq!(moved.start, d("2023-10-15"));
        assert_eq!(moved.end, d("2023-10-22"));
    }

    #[test]
    fn serializes_flat_with_kebab_status() {
        let mut payload = SiteTask::new(Uuid::nil(), "Excavation");
        payload.status = TaskStatus::InProgress;
        let task = Task::new(Uuid::nil(), d("2023-10-06"), d("2023-10-12"), payload);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["start_date"], "2023-10-06");
        assert_eq!(json["end_date"], "2023-10-12");
        assert_eq!(json["name"], "Excavation");
        assert_eq!(json["status"], "in-progress");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
