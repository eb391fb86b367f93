use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::Schedule;
use super::task::Task;

/// Normalized `(position, width)` of a task bar along the timeline, both
/// fractions of the project window. The host multiplies by its chart width
/// to get pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskSpan {
    pub position: f32,
    pub width: f32,
}

/// The project window and zoom state: maps calendar dates to a normalized
/// `[0, 1]` position along the timeline and pixel deltas back to whole-day
/// deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// The leftmost date of the project window.
    pub project_start: NaiveDate,
    /// The rightmost date of the project window.
    pub project_end: NaiveDate,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl Timeline {
    pub fn new(project_start: NaiveDate, project_end: NaiveDate) -> Self {
        Self {
            project_start,
            project_end,
            pixels_per_day: 18.0,
        }
    }

    /// Derive a window from the schedule's date bounds, with a week of lead
    /// margin and a month of tail margin. Falls back to a window around
    /// `fallback` for an empty schedule.
    pub fn around_schedule(schedule: &Schedule, fallback: NaiveDate) -> Self {
        match schedule.date_bounds() {
            Some((min, max)) => Self::new(
                min - chrono::Duration::days(7),
                max + chrono::Duration::days(30),
            ),
            None => Self::new(fallback, fallback + chrono::Duration::days(30)),
        }
    }

    /// Window length in days, never less than one so a degenerate window
    /// (start == end) cannot divide by zero.
    pub fn total_duration_days(&self) -> i64 {
        (self.project_end - self.project_start).num_days().max(1)
    }

    /// Normalized offset of a date from the window start. Dates before the
    /// window map below zero, dates after it above one; the engine never
    /// clamps, the host clips.
    pub fn offset_of(&self, date: NaiveDate) -> f32 {
        let days = (date - self.project_start).num_days() as f32;
        days / self.total_duration_days() as f32
    }

    /// Normalized `(position, width)` pair for one task's bar.
    pub fn span_of(&self, task: &Task) -> TaskSpan {
        let position = self.offset_of(task.start);
        TaskSpan {
            position,
            width: self.offset_of(task.due) - position,
        }
    }

    /// Invert an accumulated pixel delta to a whole-day delta. Rounding to
    /// whole days is mandatory; propagation never sees fractional days.
    pub fn days_for_pixels(&self, pixel_delta: f32) -> i64 {
        (pixel_delta / self.pixels_per_day).round() as i64
    }

    /// Zoom in (increase pixels per day).
    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(80.0);
    }

    /// Zoom out (decrease pixels per day).
    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(2.0);
    }

    /// Scroll the window by a number of days.
    pub fn scroll_days(&mut self, days: i64) {
        self.project_start += chrono::Duration::days(days);
        self.project_end += chrono::Duration::days(days);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn offsets_are_fractions_of_the_window() {
        let timeline = Timeline::new(date(1), date(11));
        assert_eq!(timeline.total_duration_days(), 10);
        assert_eq!(timeline.offset_of(date(1)), 0.0);
        assert_eq!(timeline.offset_of(date(6)), 0.5);
        assert_eq!(timeline.offset_of(date(11)), 1.0);
    }

    #[test]
    fn degenerate_window_does_not_divide_by_zero() {
        let timeline = Timeline::new(date(5), date(5));
        assert_eq!(timeline.total_duration_days(), 1);
        assert_eq!(timeline.offset_of(date(5)), 0.0);
        assert_eq!(timeline.offset_of(date(6)), 1.0);
    }

    #[test]
    fn span_covers_position_and_width() {
        let timeline = Timeline::new(date(1), date(17));
        let task = Task::new("t", date(5), date(13));
        let span = timeline.span_of(&task);
        assert_eq!(span.position, 0.25);
        assert_eq!(span.width, 0.5);
    }

    #[test]
    fn pixel_deltas_round_to_whole_days() {
        let mut timeline = Timeline::new(date(1), date(31));
        timeline.pixels_per_day = 10.0;
        assert_eq!(timeline.days_for_pixels(0.0), 0);
        assert_eq!(timeline.days_for_pixels(34.0), 3);
        assert_eq!(timeline.days_for_pixels(36.0), 4);
        assert_eq!(timeline.days_for_pixels(-34.0), -3);
    }

    #[test]
    fn zoom_stays_within_limits() {
        let mut timeline = Timeline::new(date(1), date(31));
        for _ in 0..100 {
            timeline.zoom_in();
        }
        assert_eq!(timeline.pixels_per_day, 80.0);
        for _ in 0..100 {
            timeline.zoom_out();
        }
        assert_eq!(timeline.pixels_per_day, 2.0);
    }
}
