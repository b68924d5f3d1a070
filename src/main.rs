use anyhow::Context;
use dotenvy::dotenv;
use isml::logging::init_tracing;
use isml::router::init_router;
use isml::state::init_app_state;
use isml_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let state = init_app_state(&server_config).await?;
    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(port = server_config.port, "🚀 Server running");
    tracing::info!("📖 Scalar UI available at http://localhost:{}/scalar", server_config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
