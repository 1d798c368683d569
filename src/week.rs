use crate::models::DayOfWeek;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Offsets are clamped to this many weeks either side of today so the
/// arithmetic stays inside chrono's date range.
pub const MAX_OFFSET_WEEKS: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabel {
    pub day: DayOfWeek,
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    pub offset: i64,
    pub start: NaiveDateTime,
    pub days: [DayLabel; 7],
}

impl WeekWindow {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.start_date() + Duration::days(6)
    }

    /// e.g. `Oct 18 - Oct 24, 2026`
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_date().format("%b %-d"),
            self.end_date().format("%b %-d, %Y")
        )
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Midnight of the Sunday that starts the week `offset` weeks away from `today`.
pub fn week_start_at(today: NaiveDate, offset: i64) -> NaiveDateTime {
    let offset = offset.clamp(-MAX_OFFSET_WEEKS, MAX_OFFSET_WEEKS);
    let shifted = today + Duration::weeks(offset);
    let sunday = shifted - Duration::days(i64::from(shifted.weekday().num_days_from_sunday()));
    sunday.and_time(NaiveTime::MIN)
}

pub fn week_window_at(today: NaiveDate, offset: i64) -> WeekWindow {
    let start = week_start_at(today, offset);
    let days = DayOfWeek::ALL.map(|day| {
        let date = start.date() + Duration::days(day.index() as i64);
        DayLabel {
            day,
            date,
            label: day_label(date),
        }
    });

    WeekWindow { offset, start, days }
}

/// Short display label, e.g. `Wed, Oct 21`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}
