use crate::models::{DayOfWeek, Task, TaskDraft};
use chrono::NaiveDateTime;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Completed,
    Reopened,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends one task, or one per weekday when the draft repeats weekly.
    /// Blank text adds nothing, and so does a submission whose ids would
    /// run past `i64::MAX`. Returns the ids that were assigned.
    pub fn add(&mut self, draft: TaskDraft, week_start: NaiveDateTime, now_millis: i64) -> Vec<i64> {
        let text = draft.text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let days: &[DayOfWeek] = if draft.repeat_weekly {
            &DayOfWeek::ALL
        } else {
            std::slice::from_ref(&draft.day)
        };

        let ids = self
            .next_id(now_millis)
            .and_then(|first| first.checked_add(days.len() as i64 - 1).map(|last| first..=last));
        let Some(ids) = ids else {
            warn!(count = days.len(), "task id space exhausted, submission dropped");
            return Vec::new();
        };

        let mut added = Vec::with_capacity(days.len());
        for (id, day) in ids.zip(days) {
            self.tasks.push(Task {
                id,
                text: text.to_string(),
                completed: false,
                day: *day,
                week_start_date: week_start,
                time: draft.time.clone(),
            });
            added.push(id);
        }
        added
    }

    pub fn toggle(&mut self, id: i64) -> Option<Toggle> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        Some(if task.completed {
            Toggle::Completed
        } else {
            Toggle::Reopened
        })
    }

    /// Replaces the text in place. Blank replacement text is ignored.
    pub fn edit_text(&mut self, id: i64, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub fn reassign_day(&mut self, id: i64, day: DayOfWeek) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.day = day;
                true
            }
            None => false,
        }
    }

    pub fn in_week(&self, week_start: NaiveDateTime) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.week_start_date == week_start)
    }

    pub fn on_day(&self, week_start: NaiveDateTime, day: DayOfWeek) -> impl Iterator<Item = &Task> {
        self.in_week(week_start).filter(move |task| task.day == day)
    }

    pub fn has_week(&self, week_start: NaiveDateTime) -> bool {
        self.in_week(week_start).next().is_some()
    }

    /// Ids come from the clock but never fall at or below an existing id.
    fn next_id(&self, now_millis: i64) -> Option<i64> {
        match self.tasks.iter().map(|task| task.id).max() {
            Some(max) => max.checked_add(1).map(|floor| now_millis.max(floor)),
            None => Some(now_millis),
        }
    }
}
