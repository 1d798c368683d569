use crate::errors::AppError;
use crate::models::{
    parse_time_of_day, AddTasksResponse, DayOfWeek, Direction, EditTaskRequest, MoveTaskRequest,
    NavigateRequest, NewTaskRequest, TaskDraft, TaskForm, Theme, ThemePayload, WeekView,
};
use crate::navigation::navigate_at;
use crate::state::{AppData, AppState};
use crate::storage::persist_storage;
use crate::store::Toggle;
use crate::ui::render_index;
use crate::view::build_week_view_at;
use crate::week::{today, week_start_at};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Utc;
use tracing::{debug, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&current_view(&state, &data)))
}

pub async fn get_week(State(state): State<AppState>) -> Json<WeekView> {
    let data = state.data.lock().await;
    Json(current_view(&state, &data))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTaskRequest>,
) -> Result<Json<AddTasksResponse>, AppError> {
    let draft = TaskDraft {
        time: parse_time_of_day(payload.time.as_deref())?,
        text: payload.text,
        day: payload.day,
        repeat_weekly: payload.repeat_weekly,
    };

    let mut data = state.data.lock().await;
    let added = apply_add(&state, &mut data, draft).await?;
    Ok(Json(AddTasksResponse {
        added,
        week: current_view(&state, &data),
    }))
}

pub async fn create_task_form(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    let draft = TaskDraft {
        time: parse_time_of_day(form.time.as_deref())?,
        text: form.text,
        day: form.day,
        repeat_weekly: form.repeat.is_some(),
    };

    let mut data = state.data.lock().await;
    apply_add(&state, &mut data, draft).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WeekView>, AppError> {
    let mut data = state.data.lock().await;
    apply_toggle(&state, &mut data, id).await?;
    Ok(Json(current_view(&state, &data)))
}

pub async fn toggle_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    apply_toggle(&state, &mut data, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EditTaskRequest>,
) -> Result<Json<WeekView>, AppError> {
    let mut data = state.data.lock().await;
    apply_edit(&state, &mut data, id, &payload.text).await?;
    Ok(Json(current_view(&state, &data)))
}

pub async fn edit_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditTaskRequest>,
) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    apply_edit(&state, &mut data, id, &form.text).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WeekView>, AppError> {
    let mut data = state.data.lock().await;
    apply_delete(&state, &mut data, id).await?;
    Ok(Json(current_view(&state, &data)))
}

pub async fn delete_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    apply_delete(&state, &mut data, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MoveTaskRequest>,
) -> Result<Json<WeekView>, AppError> {
    let mut data = state.data.lock().await;
    apply_move(&state, &mut data, id, payload.day).await?;
    Ok(Json(current_view(&state, &data)))
}

pub async fn move_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<MoveTaskRequest>,
) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    apply_move(&state, &mut data, id, form.day).await?;
    Ok(Redirect::to("/"))
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Json<WeekView> {
    let mut data = state.data.lock().await;
    apply_navigate(&mut data, payload.direction);
    Json(current_view(&state, &data))
}

pub async fn week_prev(State(state): State<AppState>) -> Redirect {
    apply_navigate(&mut *state.data.lock().await, Direction::Back);
    Redirect::to("/")
}

pub async fn week_next(State(state): State<AppState>) -> Redirect {
    apply_navigate(&mut *state.data.lock().await, Direction::Forward);
    Redirect::to("/")
}

pub async fn week_today(State(state): State<AppState>) -> Redirect {
    apply_navigate(&mut *state.data.lock().await, Direction::Today);
    Redirect::to("/")
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemePayload> {
    let data = state.data.lock().await;
    Json(ThemePayload { theme: data.theme })
}

pub async fn put_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemePayload>,
) -> Result<Json<ThemePayload>, AppError> {
    let mut data = state.data.lock().await;
    apply_theme(&state, &mut data, payload.theme).await?;
    Ok(Json(ThemePayload { theme: data.theme }))
}

pub async fn toggle_theme_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut data = state.data.lock().await;
    let theme = data.theme.toggled();
    apply_theme(&state, &mut data, theme).await?;
    Ok(Redirect::to("/"))
}

async fn apply_add(state: &AppState, data: &mut AppData, draft: TaskDraft) -> Result<Vec<i64>, AppError> {
    let week_start = week_start_at(today(), data.week_offset);
    let added = data.store.add(draft, week_start, Utc::now().timestamp_millis());
    if added.is_empty() {
        debug!("submission added no tasks");
        return Ok(added);
    }

    info!(count = added.len(), week_start = %week_start, "tasks added");
    commit(state, data).await?;
    Ok(added)
}

async fn apply_toggle(state: &AppState, data: &mut AppData, id: i64) -> Result<(), AppError> {
    let Some(toggle) = data.store.toggle(id) else {
        debug!(id, "toggle for unknown task");
        return Ok(());
    };

    if toggle == Toggle::Completed {
        state.celebration.trigger();
    }
    info!(id, ?toggle, "task toggled");
    commit(state, data).await
}

async fn apply_edit(state: &AppState, data: &mut AppData, id: i64, text: &str) -> Result<(), AppError> {
    if !data.store.edit_text(id, text) {
        debug!(id, "edit ignored");
        return Ok(());
    }

    info!(id, "task edited");
    commit(state, data).await
}

async fn apply_delete(state: &AppState, data: &mut AppData, id: i64) -> Result<(), AppError> {
    if !data.store.delete(id) {
        debug!(id, "delete for unknown task");
        return Ok(());
    }

    info!(id, "task deleted");
    commit(state, data).await
}

async fn apply_move(
    state: &AppState,
    data: &mut AppData,
    id: i64,
    day: DayOfWeek,
) -> Result<(), AppError> {
    if !data.store.reassign_day(id, day) {
        debug!(id, "move for unknown task");
        return Ok(());
    }

    info!(id, %day, "task moved");
    commit(state, data).await
}

async fn apply_theme(state: &AppState, data: &mut AppData, theme: Theme) -> Result<(), AppError> {
    data.theme = theme;
    commit(state, data).await
}

fn apply_navigate(data: &mut AppData, direction: Direction) {
    let offset = navigate_at(today(), data.week_offset, direction, &data.store);
    debug!(from = data.week_offset, to = offset, ?direction, "navigate");
    data.week_offset = offset;
}

/// Mirrors in-memory state into storage and writes it out.
async fn commit(state: &AppState, data: &mut AppData) -> Result<(), AppError> {
    data.sync()?;
    persist_storage(&state.data_path, &data.storage)
        .await
        .inspect_err(|err| {
            warn!(
                path = %state.data_path.display(),
                error = %err.message,
                "write failed, in-memory tasks are ahead of storage"
            );
        })
}

fn current_view(state: &AppState, data: &AppData) -> WeekView {
    build_week_view_at(today(), data, state.celebration.is_active())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::storage::{load_storage, TASKS_KEY};
    use crate::store::TaskStore;
    use axum::http::StatusCode;
    use std::path::PathBuf;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id,
            text: "Water plants".into(),
            completed,
            day: DayOfWeek::Thursday,
            week_start_date: week_start_at(today(), 0),
            time: None,
        }
    }

    fn state_with(path: PathBuf, tasks: Vec<Task>) -> AppState {
        AppState::new(
            path,
            AppData {
                store: TaskStore::new(tasks),
                ..AppData::default()
            },
        )
    }

    #[tokio::test]
    async fn completing_a_task_celebrates() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().join("storage.json"), vec![task(7, false)]);

        let Json(view) = toggle_task(State(state.clone()), Path(7)).await.unwrap();
        assert!(view.celebrating);
        assert!(state.celebration.is_active());
    }

    #[tokio::test]
    async fn reopening_a_task_does_not_celebrate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let state = state_with(path.clone(), vec![task(7, true)]);

        let Json(view) = toggle_task(State(state.clone()), Path(7)).await.unwrap();
        assert!(!view.celebrating);
        assert!(!state.celebration.is_active());

        let stored = load_storage(&path).await;
        let tasks: Vec<Task> = serde_json::from_str(stored.get(TASKS_KEY).unwrap()).unwrap();
        assert!(!tasks[0].completed);
    }

    #[tokio::test]
    async fn failed_write_reports_error_and_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path().join("missing").join("storage.json"), Vec::new());

        let payload = NewTaskRequest {
            text: "Call the bank".into(),
            day: DayOfWeek::Monday,
            time: None,
            repeat_weekly: false,
        };
        let err = create_task(State(state.clone()), Json(payload)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.data.lock().await.store.len(), 1);
    }
}
