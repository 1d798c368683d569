use crate::models::{DayColumn, Task, WeekView};
use crate::navigation::navigation_at;
use crate::progress::progress_at;
use crate::state::AppData;
use crate::week::week_window_at;
use chrono::NaiveDate;

pub fn build_week_view_at(today: NaiveDate, data: &AppData, celebrating: bool) -> WeekView {
    let window = week_window_at(today, data.week_offset);

    let days = window
        .days
        .iter()
        .map(|label| {
            let mut tasks: Vec<Task> = data
                .store
                .on_day(window.start, label.day)
                .cloned()
                .collect();
            // timed tasks first, by time; untimed keep insertion order
            tasks.sort_by_key(|task| (task.time.is_none(), task.time.clone()));
            DayColumn {
                day: label.day,
                label: label.label.clone(),
                is_today: label.date == today,
                tasks,
            }
        })
        .collect();

    WeekView {
        offset: data.week_offset,
        week_start: window.start,
        range: window.range_label(),
        days,
        navigation: navigation_at(today, data.week_offset, &data.store),
        progress: progress_at(today, data.week_offset, &data.store),
        celebrating,
        theme: data.theme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, TaskDraft};
    use crate::week::week_start_at;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
    }

    fn add(data: &mut AppData, text: &str, day: DayOfWeek, time: Option<&str>, offset: i64) {
        data.store.add(
            TaskDraft {
                text: text.into(),
                day,
                time: time.map(str::to_owned),
                repeat_weekly: false,
            },
            week_start_at(today(), offset),
            1,
        );
    }

    #[test]
    fn buckets_tasks_by_day_within_viewed_week() {
        let mut data = AppData::default();
        add(&mut data, "Buy milk", DayOfWeek::Monday, None, 0);
        add(&mut data, "Next week", DayOfWeek::Monday, None, 1);

        let view = build_week_view_at(today(), &data, false);
        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[1].day, DayOfWeek::Monday);
        assert_eq!(view.days[1].tasks.len(), 1);
        assert_eq!(view.days[1].tasks[0].text, "Buy milk");
        assert!(view.days[3].is_today);
        assert!(!view.days[1].is_today);
        assert_eq!(view.range, "Oct 18 - Oct 24, 2026");
    }

    #[test]
    fn timed_tasks_sort_before_untimed() {
        let mut data = AppData::default();
        add(&mut data, "untimed a", DayOfWeek::Friday, None, 0);
        add(&mut data, "late", DayOfWeek::Friday, Some("18:00"), 0);
        add(&mut data, "untimed b", DayOfWeek::Friday, None, 0);
        add(&mut data, "early", DayOfWeek::Friday, Some("07:15"), 0);

        let view = build_week_view_at(today(), &data, false);
        let texts: Vec<_> = view.days[5].tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["early", "late", "untimed a", "untimed b"]);
    }

    #[test]
    fn future_week_has_no_today_and_navigation_follows_offset() {
        let mut data = AppData::default();
        data.week_offset = 4;
        let view = build_week_view_at(today(), &data, true);
        assert!(view.days.iter().all(|d| !d.is_today));
        assert!(!view.navigation.can_go_forward);
        assert!(!view.navigation.can_go_back);
        assert!(view.celebrating);
    }
}
