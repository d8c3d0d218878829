use chrono::{Days, Duration, Months, NaiveDate};

use super::task::Task;

/// Days of padding added on each side of the task span.
pub const VIEWPORT_PADDING_DAYS: u64 = 7;

/// The calendar range laid out on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRange {
    /// The leftmost laid-out date.
    pub start: NaiveDate,
    /// The rightmost laid-out date (inclusive).
    pub end: NaiveDate,
}

impl ViewportRange {
    /// Convert a date to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDate, scale: f32) -> f32 {
        days_between(self.start, date) as f32 * scale
    }

    /// Total width in pixels, with the last day fully drawn.
    pub fn total_width(&self, scale: f32) -> f32 {
        (days_between(self.start, self.end) + 1) as f32 * scale
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Horizontal extents of a task bar, in pixels from the viewport start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPosition {
    /// Left edge of the effective span (buffer included).
    pub left: f32,
    /// Width of the effective span.
    pub width: f32,
    pub buffer_before_width: f32,
    pub main_width: f32,
    pub buffer_after_width: f32,
}

impl BarPosition {
    /// Left edge of the main (unbuffered) segment.
    pub fn main_left(&self) -> f32 {
        self.left + self.buffer_before_width
    }
}

/// Signed count of whole calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Map a task's effective span onto pixel extents relative to `viewport_start`.
///
/// `left` is negative when the span starts before the viewport. An inverted
/// task range gives a negative width; callers are expected to pass records
/// built through [`Task::new`].
pub fn position_of(task: &Task, viewport_start: NaiveDate, scale: f32) -> BarPosition {
    let span_start = task.effective_start();
    let span_end = task.effective_end();
    BarPosition {
        left: days_between(viewport_start, span_start) as f32 * scale,
        width: days_between(span_start, span_end) as f32 * scale,
        buffer_before_width: task.buffer_before as f32 * scale,
        main_width: task.duration_days() as f32 * scale,
        buffer_after_width: task.buffer_after as f32 * scale,
    }
}

/// Visible range for `tasks`, anchored at the local date when the list is empty.
pub fn bounds_of(tasks: &[Task]) -> ViewportRange {
    bounds_of_at(tasks, chrono::Local::now().date_naive())
}

/// Visible range for `tasks`.
///
/// An empty list yields `[today, today + 1 month]`. Otherwise the range covers
/// every effective span plus [`VIEWPORT_PADDING_DAYS`] on both sides.
pub fn bounds_of_at(tasks: &[Task], today: NaiveDate) -> ViewportRange {
    let span_start = tasks.iter().map(Task::effective_start).min();
    let span_end = tasks.iter().map(Task::effective_end).max();

    match (span_start, span_end) {
        (Some(min), Some(max)) => {
            let padding = Days::new(VIEWPORT_PADDING_DAYS);
            ViewportRange {
                start: min.checked_sub_days(padding).unwrap_or(NaiveDate::MIN),
                end: max.checked_add_days(padding).unwrap_or(NaiveDate::MAX),
            }
        }
        _ => ViewportRange {
            start: today,
            end: today
                .checked_add_months(Months::new(1))
                .unwrap_or(today + Duration::days(30)),
        },
    }
}
