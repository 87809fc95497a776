//! Property tests for lane allocation and row building.

use buildplan::layout::{allocate_lanes, build_rows, lane_count, row_height};
use buildplan::model::dates::add_days;
use buildplan::model::Task;
use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default()
}

/// Tasks within a 60 day window, lasting 1 to 15 days.
fn arb_tasks() -> impl Strategy<Value = Vec<Task<()>>> {
    let group = Uuid::from_u128(7);
    prop::collection::vec((0i64..60, 0i64..15), 0..40).prop_map(move |spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (offset, len))| {
                let mut task = Task::new(group, add_days(base(), offset), add_days(base(), offset + len), ());
                task.id = Uuid::from_u128(i as u128 + 1);
                task
            })
            .collect()
    })
}

/// Largest number of tasks covering any single day.
fn max_overlap(tasks: &[Task<()>]) -> usize {
    (0..80)
        .map(|d| add_days(base(), d))
        .map(|day| tasks.iter().filter(|t| t.start <= day && day <= t.end).count())
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn lane_count_equals_peak_overlap(tasks in arb_tasks()) {
        let lanes = allocate_lanes(&tasks);
        prop_assert_eq!(lanes.len(), tasks.len());
        prop_assert_eq!(lane_count(&lanes), max_overlap(&tasks));
    }

    #[test]
    fn tasks_sharing_a_lane_never_overlap(tasks in arb_tasks()) {
        let lanes = allocate_lanes(&tasks);
        for a in &tasks {
            for b in &tasks {
                if a.id != b.id && lanes[&a.id] == lanes[&b.id] {
                    prop_assert!(a.end < b.start || b.end < a.start,
                        "{:?} and {:?} share lane {}", (a.start, a.end), (b.start, b.end), lanes[&a.id]);
                }
            }
        }
    }

    #[test]
    fn allocation_is_deterministic(tasks in arb_tasks()) {
        prop_assert_eq!(allocate_lanes(&tasks), allocate_lanes(&tasks));
    }

    #[test]
    fn rebuilding_rows_is_idempotent(tasks in arb_tasks()) {
        let key = Uuid::from_u128(7);
        let first = build_rows(vec![(key, tasks.clone())]);
        let second = build_rows(vec![(key, tasks)]);
        prop_assert_eq!(first[0].height, row_height(first[0].lane_count()));
        prop_assert_eq!(first, second);
    }
}
