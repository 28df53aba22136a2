use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use futbolai_api::{app, deps::AppState};
use futbolai_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("futbolai_api=info".parse()?))
        .init();

    let config = Config::from_env();
    if config.groq_api_key.is_none() {
        info!("GROQ_API_KEY not set; classification and analysis will use keyword fallbacks");
    }
    if config.youtube_api_key.is_none() {
        info!("YOUTUBE_API_KEY not set; highlights will come from the static pool");
    }

    let state = Arc::new(AppState::from_config(&config));
    let router = app(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "FutbolAI API listening");
    axum::serve(listener, router).await?;

    Ok(())
}
