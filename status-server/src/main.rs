use status_server::config::ServerConfig;
use status_server::routes::{status_router, AppState};
use status_server::template::DEFAULT_INDEX;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("failed to start status server: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env()?;

    let template = match &config.index_template {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("read {}: {e}", path.display()))?,
        None => DEFAULT_INDEX.to_string(),
    };

    let bind = config.bind.clone();
    let oidc = config.oidc;
    let assets = config.assets_dir.display().to_string();
    let app = status_router(AppState::new(config, &template));

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| format!("bind {bind}: {e}"))?;

    tracing::info!(%bind, oidc, %assets, "status server listening");
    axum::serve(listener, app).await.map_err(|e| e.to_string())
}
