use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use arrivals_server::config::{ServerConfig, SourceConfig};
use arrivals_server::marta::{ArrivalProvider, MartaClient, MartaConfig, MockMartaClient};
use arrivals_server::snapshot::{SnapshotStore, spawn_poller};
use arrivals_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    let provider = match &config.source {
        SourceConfig::Live { api_key, base_url } => {
            info!(%base_url, "using live MARTA API");
            let marta_config = MartaConfig::new(api_key).with_base_url(base_url);
            ArrivalProvider::Live(MartaClient::new(marta_config)?)
        }
        SourceConfig::Mock { path } => {
            info!(path = %path.display(), "using mock arrivals file");
            ArrivalProvider::Mock(MockMartaClient::new(path)?)
        }
    };
    let provider = Arc::new(provider);

    let store = SnapshotStore::new();
    spawn_poller(provider.clone(), store.clone(), config.refresh_interval);

    let state = AppState::new(store, provider, config.refresh_interval);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        refresh_secs = config.refresh_interval.as_secs(),
        "MARTA arrivals board listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
