use uuid::Uuid;

use super::lanes::{allocate_lanes, lane_count, LaneMap};
use super::{BASE_PADDING, MIN_ROW_HEIGHT, TASK_GAP, TASK_HEIGHT};
use crate::model::Task;

/// One assignee row: its tasks, their lanes, and the row height.
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel<P> {
    pub group: Uuid,
    pub tasks: Vec<Task<P>>,
    pub lanes: LaneMap,
    pub height: f32,
}

impl<P> RowModel<P> {
    pub fn lane_of(&self, task_id: Uuid) -> usize {
        self.lanes.get(&task_id).copied().unwrap_or(0)
    }

    pub fn lane_count(&self) -> usize {
        lane_count(&self.lanes)
    }
}

/// Height of a row holding `lanes` lanes.
pub fn row_height(lanes: usize) -> f32 {
    (BASE_PADDING + lanes as f32 * (TASK_HEIGHT + TASK_GAP)).max(MIN_ROW_HEIGHT)
}

/// Build one row per group, in the order given.
pub fn build_rows<P>(groups: impl IntoIterator<Item = (Uuid, Vec<Task<P>>)>) -> Vec<RowModel<P>> {
    groups
        .into_iter()
        .map(|(group, tasks)| {
            let lanes = allocate_lanes(&tasks);
            let height = row_height(lane_count(&lanes));
            RowModel {
                group,
                tasks,
                lanes,
                height,
            }
        })
        .collect()
}

/// Partition `tasks` by group key, keeping the order of `keys` and of the
/// tasks within each group. Tasks with an unlisted key are dropped.
pub fn group_tasks<P: Clone>(keys: &[Uuid], tasks: &[Task<P>]) -> Vec<(Uuid, Vec<Task<P>>)> {
    keys.iter()
        .map(|&key| {
            let members = tasks.iter().filter(|t| t.group == key).cloned().collect();
            (key, members)
        })
        .collect()
}
