//! Row and lane layout of the timeline body.

pub mod lanes;
pub mod rows;

pub use lanes::{allocate_lanes, lane_count, LaneMap};
pub use rows::{build_rows, group_tasks, row_height, RowModel};

// ── Geometry shared with the renderer ────────────────────────────────────────

pub const TASK_HEIGHT: f32 = 28.0;
pub const TASK_GAP: f32 = 8.0;
pub const MIN_ROW_HEIGHT: f32 = 80.0;
pub const BASE_PADDING: f32 = 40.0;
/// Distance from a row's top edge to its first lane.
pub const TASK_TOP_OFFSET: f32 = 20.0;
