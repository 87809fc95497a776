use chrono::NaiveDate;

use super::dates::{self, DateRange, DAY_WIDTH};

/// The visible span of the timeline and its coordinate mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineViewport {
    /// The leftmost visible date.
    pub start: NaiveDate,
    /// The rightmost visible date (inclusive).
    pub end: NaiveDate,
}

impl TimelineViewport {
    pub fn new(range: DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Convert a date to an x offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        dates::pixel_x(date, self.start)
    }

    /// Convert an x offset back to the nearest date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        dates::add_days(self.start, dates::day_offset(x))
    }

    /// Number of day columns, both ends included.
    pub fn total_days(&self) -> i64 {
        dates::diff_in_days(self.end, self.start) + 1
    }

    /// Total width in points for the visible range.
    pub fn total_width(&self) -> f32 {
        self.total_days() as f32 * DAY_WIDTH
    }

    /// Every visible date, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.total_days()).map(move |i| dates::add_days(start, i))
    }
}

impl From<DateRange> for TimelineViewport {
    fn from(range: DateRange) -> Self {
        Self::new(range)
    }
}
