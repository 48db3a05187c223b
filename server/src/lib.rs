pub mod config;
pub mod engine;
pub mod errors;
pub mod routes;
pub mod state;

use color_eyre::eyre::Context as _;

pub use config::Config;
use state::AppState;

/// Create the validator router
pub fn create_router(config: &Config) -> axum::Router {
    routes::routes(AppState::from_config(config))
}

/// Run the validator on the configured address
pub async fn run_server(config: Config) -> color_eyre::Result<()> {
    let app = create_router(&config);
    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!(addr = %listener.local_addr()?, "Snake validator listening");
    axum::serve(listener, app).await?;
    Ok(())
}
