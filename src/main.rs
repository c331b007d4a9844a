mod config;
mod routes;

use leptos::config::get_configuration;
use tracing_subscriber::EnvFilter;

use crate::config::{HostConfig, HostError};

#[tokio::main]
async fn main() -> Result<(), HostError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let host = HostConfig::from_env()?;
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let app = routes::app(conf.leptos_options);

    let listener = tokio::net::TcpListener::bind(host.addr).await?;
    tracing::info!(addr = %host.addr, "authgate listening");
    axum::serve(listener, app).await?;
    Ok(())
}
