mod api;
mod cli;
mod live;
mod router;
mod state;

use std::sync::Arc;

use tracing::info;

fn load_config() -> upp_core::Config {
    upp_core::config::load_dotenv();
    upp_core::Config::from_env()
}

async fn serve(config: &upp_core::Config) -> anyhow::Result<()> {
    config.log_summary();

    let state = Arc::new(state::AppState::from_config(config));
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = load_config();
    let args: Vec<String> = std::env::args().collect();

    if cli::dispatch(&config, &args)? {
        return Ok(());
    }
    serve(&config).await
}
