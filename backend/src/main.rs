//! Umuhinzi Yield Prediction Service - Server Binary

use std::{net::SocketAddr, path::Path, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use umuhinzi_backend::external::weather::WeatherClient;
use umuhinzi_backend::services::{ConfigAuthProvider, ForestModel};
use umuhinzi_backend::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umuhinzi_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Umuhinzi Yield Prediction Server");
    tracing::info!("Environment: {}", config.environment);

    // Load the model artifact. A failure here aborts startup: the service
    // must not serve predictions without a model.
    let model = ForestModel::load(Path::new(&config.model.path))?;

    // Create application state
    let state = AppState {
        model: Arc::new(model),
        weather: Arc::new(WeatherClient::new(&config.weather)),
        auth: Arc::new(ConfigAuthProvider::new(&config.auth)),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
