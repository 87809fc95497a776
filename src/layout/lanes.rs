//! Greedy interval partitioning of one row's tasks into vertical lanes.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::Task;

/// Lane index per task id, scoped to a single row.
pub type LaneMap = HashMap<Uuid, usize>;

/// Assign every task a lane so that no two tasks in a lane share a day.
///
/// Tasks are swept by start date (a stable sort, so equal starts keep their
/// input order). Each goes into the first lane whose last task ended strictly
/// before it starts, or into a new lane. The sweep never opens more lanes
/// than the largest number of tasks active on one day, which is the minimum.
///
/// A task with `end < start` is treated as occupying its start day only.
pub fn allocate_lanes<P>(tasks: &[Task<P>]) -> LaneMap {
    let mut order: Vec<&Task<P>> = tasks.iter().collect();
    order.sort_by_key(|t| t.start);

    // Last occupied day of each open lane.
    let mut lane_ends: Vec<NaiveDate> = Vec::new();
    let mut lanes = LaneMap::with_capacity(tasks.len());

    for task in order {
        let end = task.end.max(task.start);
        let lane = match lane_ends.iter().position(|&lane_end| lane_end < task.start) {
            Some(free) => {
                lane_ends[free] = end;
                free
            }
            None => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
        };
        lanes.insert(task.id, lane);
    }

    lanes
}

/// Number of lanes a map uses.
pub fn lane_count(lanes: &LaneMap) -> usize {
    lanes.values().max().map_or(0, |&max| max + 1)
}
