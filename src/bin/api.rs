use std::sync::Arc;

use anyhow::Context;
use host_summarizer::api::{RelayState, build_router};
use host_summarizer::clients::LlmClient;
use host_summarizer::core::config::{AgentConfig, AppConfig};
use host_summarizer::worker::AgentPool;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    host_summarizer::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;
    let agent_config = AgentConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;

    let agent = LlmClient::from_config(&agent_config).with_timeout(config.agent_timeout);
    let pool = AgentPool::new(Arc::new(agent), config.workers, config.agent_timeout);
    let app = build_router(RelayState::new(pool), config.cors_origins.as_deref());

    if config.cors_origins.is_none() {
        info!("CORS is permissive; set SUMMARIZER_CORS_ORIGINS to restrict it");
    }

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(
        addr = %config.addr,
        workers = config.workers,
        agent_timeout_secs = config.agent_timeout.as_secs(),
        model = %agent_config.openai_model,
        "Host summarizer API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server exited with error")?;

    info!("Host summarizer API stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("Shutdown signal received");
}
