use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks", post(handlers::create_task_form))
        .route("/tasks/:id/toggle", post(handlers::toggle_task_form))
        .route("/tasks/:id/edit", post(handlers::edit_task_form))
        .route("/tasks/:id/delete", post(handlers::delete_task_form))
        .route("/tasks/:id/move", post(handlers::move_task_form))
        .route("/week/prev", post(handlers::week_prev))
        .route("/week/next", post(handlers::week_next))
        .route("/week/today", post(handlers::week_today))
        .route("/theme/toggle", post(handlers::toggle_theme_form))
        .route("/api/week", get(handlers::get_week))
        .route("/api/tasks", post(handlers::create_task))
        .route("/api/tasks/:id", put(handlers::edit_task).delete(handlers::delete_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id/day", post(handlers::move_task))
        .route("/api/navigate", post(handlers::navigate))
        .route("/api/theme", get(handlers::get_theme).put(handlers::put_theme))
        .with_state(state)
}
