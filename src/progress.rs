use crate::models::{DayOfWeek, ProgressResponse, Task};
use crate::store::TaskStore;
use crate::week::week_start_at;
use chrono::{Datelike, NaiveDate};

/// Share of completed tasks as a percentage in `[0, 100]`; no tasks is 0.
pub fn completion_percent<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> f64 {
    let (total, done) = tasks.into_iter().fold((0u32, 0u32), |(total, done), task| {
        (total + 1, done + u32::from(task.completed))
    });
    if total == 0 {
        0.0
    } else {
        f64::from(done) / f64::from(total) * 100.0
    }
}

/// Weekly progress covers the viewed week. Daily progress covers today's
/// tasks in the current week, whichever week is on screen.
pub fn progress_at(today: NaiveDate, offset: i64, store: &TaskStore) -> ProgressResponse {
    let viewed = week_start_at(today, offset);
    let current = week_start_at(today, 0);
    let today_name = DayOfWeek::from_weekday(today.weekday());

    ProgressResponse {
        weekly: completion_percent(store.in_week(viewed)),
        daily: completion_percent(store.on_day(current, today_name)),
    }
}
