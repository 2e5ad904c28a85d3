use std::net::SocketAddr;

use server::config::Settings;
use server::create_router;
use server::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,orchestrator=info,tower_http=info".into()),
        )
        .init();

    let project_path = std::env::current_dir()?;
    let settings = Settings::read(&project_path).await.with_env();
    let port = settings.server.port;

    let state = AppState::from_settings(&settings)?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
