mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod suggestions;

use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionService, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::generator::SuggestionGenerator;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    let level = config.log_level();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_PKG_NAME")
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gift Concierge v{}", env!("CARGO_PKG_VERSION"));
    if config.debug {
        info!("Debug mode enabled");
    }

    let generator = SuggestionGenerator::new(build_completion_client(&config));

    let state = AppState { generator };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.listen_addr()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Decides once whether the completion service is usable. `None` means every
/// request is answered from the fallback list.
fn build_completion_client(config: &Config) -> Option<Arc<dyn CompletionService>> {
    let Some(api_key) = config.openai_api_key.clone() else {
        warn!("OPENAI_API_KEY not set; serving fallback suggestions only");
        return None;
    };

    match LlmClient::new(api_key, &config.openai_api_base) {
        Ok(client) => {
            info!(
                "LLM client initialized (model: {}, base: {})",
                llm_client::MODEL,
                config.openai_api_base
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("LLM client unavailable ({e}); serving fallback suggestions only");
            None
        }
    }
}
