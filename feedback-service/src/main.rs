use dotenvy::dotenv;
use feedback_service::config::FeedbackConfig;
use feedback_service::services::metrics::init_metrics;
use feedback_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // The OpenAI credential is mandatory: refuse to start without it.
    let config = FeedbackConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "feedback-service",
        "info",
        config.observability.otlp_endpoint.as_deref(),
    )?;

    init_metrics().map_err(|e| {
        tracing::error!("Failed to install metrics recorder: {}", e);
        anyhow::anyhow!("Metrics error: {}", e)
    })?;

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    Ok(())
}
