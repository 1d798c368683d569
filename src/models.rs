use chrono::{NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weekday names in display order. Weeks start on Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Position within a Sunday-first week.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay(pub String);

impl fmt::Display for UnknownDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown day '{}'", self.0)
    }
}

impl std::error::Error for UnknownDay {}

impl FromStr for DayOfWeek {
    type Err = UnknownDay;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownDay(value.to_string()))
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = UnknownDay;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub day: DayOfWeek,
    pub week_start_date: NaiveDateTime,
    #[serde(default)]
    pub time: Option<String>,
}

/// Input for a task submission, already validated at the edge.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub text: String,
    pub day: DayOfWeek,
    pub time: Option<String>,
    pub repeat_weekly: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Unrecognised values fall back to the light theme.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// Normalizes a time of day to zero-padded `HH:MM`. Blank input means no time.
pub fn parse_time_of_day(raw: Option<&str>) -> Result<Option<String>, chrono::ParseError> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let time = NaiveTime::parse_from_str(raw, "%H:%M")?;
    Ok(Some(time.format("%H:%M").to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    pub text: String,
    pub day: DayOfWeek,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub repeat_weekly: bool,
}

/// HTML form submission; an unchecked checkbox is simply absent.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    pub text: String,
    pub day: DayOfWeek,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub repeat: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveTaskRequest {
    pub day: DayOfWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Back,
    Forward,
    Today,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: Direction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemePayload {
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationBounds {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressResponse {
    pub weekly: f64,
    pub daily: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub day: DayOfWeek,
    pub label: String,
    pub is_today: bool,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub offset: i64,
    pub week_start: NaiveDateTime,
    pub range: String,
    pub days: Vec<DayColumn>,
    pub navigation: NavigationBounds,
    pub progress: ProgressResponse,
    pub celebrating: bool,
    pub theme: Theme,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTasksResponse {
    pub added: Vec<i64>,
    pub week: WeekView,
}
