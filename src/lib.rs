pub mod app;
pub mod celebration;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod navigation;
pub mod progress;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view;
pub mod week;

pub use app::router;
pub use state::{AppData, AppState};
pub use storage::{open_storage, resolve_data_path, MigrationPolicy};
