use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use weekly_todo::storage::persist_storage;
use weekly_todo::{open_storage, resolve_data_path, router, AppData, AppState, MigrationPolicy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let storage = open_storage(&data_path, MigrationPolicy::WipeOnVersionMismatch).await;
    let mut data = AppData::from_storage(storage);
    // records the version stamp even before the first edit
    data.sync()?;
    persist_storage(&data_path, &data.storage).await?;
    info!(tasks = data.store.len(), path = %data_path.display(), "storage loaded");

    let app = router(AppState::new(data_path, data));

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
