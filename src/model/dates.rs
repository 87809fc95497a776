//! Calendar-day arithmetic and the date <-> pixel mapping shared by layout,
//! rendering and drag snapping.

use chrono::NaiveDate;

use super::task::Task;

/// Width of one calendar day on the timeline, in points.
///
/// Rendering and drag snapping must both read this constant, otherwise the
/// drag preview drifts away from the grid.
pub const DAY_WIDTH: f32 = 40.0;

/// Whitespace kept after the last task.
pub const RANGE_BUFFER_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("invalid date '{input}', expected YYYY-MM-DD")]
    Invalid { input: String },
}

/// Parse a `YYYY-MM-DD` string.
///
/// `NaiveDate` has no timezone, so the result behaves like local midnight and
/// day arithmetic is never shifted by a UTC offset.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| DateError::Invalid {
        input: s.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Add `days` calendar days (may be negative).
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + chrono::Duration::days(days)
}

/// Whole days from `b` to `a`; positive when `a` is later.
pub fn diff_in_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// Visible bounds of a project timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of days shown, both ends included.
    pub fn total_days(&self) -> i64 {
        diff_in_days(self.end, self.start) + 1
    }
}

/// Compute the padded range for a project.
///
/// Spans from the earliest to the latest of the planned start and every task
/// date, with the end pushed out by [`RANGE_BUFFER_DAYS`].
pub fn date_range<P>(planned_start: NaiveDate, tasks: &[Task<P>]) -> DateRange {
    let (start, end) = tasks.iter().fold((planned_start, planned_start), |(lo, hi), t| {
        (lo.min(t.start).min(t.end), hi.max(t.start).max(t.end))
    });
    DateRange {
        start,
        end: add_days(end, RANGE_BUFFER_DAYS),
    }
}

/// Horizontal offset of `date` from the start of the range.
pub fn pixel_x(date: NaiveDate, range_start: NaiveDate) -> f32 {
    diff_in_days(date, range_start) as f32 * DAY_WIDTH
}

/// Width of `days` whole days.
pub fn pixel_days(days: i64) -> f32 {
    days as f32 * DAY_WIDTH
}

/// Snap a horizontal pointer delta to whole days.
pub fn day_offset(delta_x: f32) -> i64 {
    (delta_x / DAY_WIDTH).round() as i64
}
