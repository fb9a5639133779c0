//! essay-server: serves `POST /api/generate-essay` backed by the Ark client.
//!
//! Environment:
//!   ARK_API_KEY         provider key (requests fail with 500 when unset)
//!   ARK_BASE_URL        provider endpoint override
//!   ARK_MAX_RETRIES     retry budget (default 3)
//!   ARK_RETRY_DELAY_MS  backoff base (default 1000)
//!   ARK_MODEL           model id (default deepseek-r1-250528)
//!   ESSAY_BIND_ADDR     listen address (default 0.0.0.0:3000)
//!   RUST_LOG            tracing filter

use std::net::SocketAddr;
use std::time::Duration;

use ark_client::essay::{router, AppState};
use ark_client::ProvisionOptions;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse::<T>().ok()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ark_client=info,tower_http=warn"));
    fmt().with_env_filter(filter).compact().with_target(false).init();

    let api_key = std::env::var("ARK_API_KEY").ok();
    if api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        warn!("ARK_API_KEY is not set; generation requests will fail with 500");
    }

    let options = ProvisionOptions {
        base_url: std::env::var("ARK_BASE_URL").ok(),
        max_retries: env_parse::<u32>("ARK_MAX_RETRIES"),
        retry_delay: env_parse::<u64>("ARK_RETRY_DELAY_MS").map(Duration::from_millis),
    };

    let mut state = AppState::new(api_key, options);
    if let Ok(model) = std::env::var("ARK_MODEL") {
        if !ark_client::models::is_known(&model) {
            warn!(model = model.as_str(), "ARK_MODEL is not a predefined model id");
        }
        state = state.with_model(model);
    }
    info!(model = state.model(), "essay service configured");

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = std::env::var("ESSAY_BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;
    info!("listening on http://{}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
