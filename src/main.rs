use agent_relay::server::{router, DEFAULT_ADDR};
use agent_relay::{telemetry, Handler, Settings};
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let settings = Settings::global()?;
    info!(
        model = %settings.model_id,
        provider = ?settings.llm_provider,
        "settings resolved"
    );

    let handler = Handler::from_env()?;
    let app = router(handler);

    let addr = std::env::var("RELAY_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
