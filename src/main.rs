use legwork::application::RtcContext;
use legwork::config::{Config, StorageBackend};
use legwork::domain::correlation::CorrelationStore;
use legwork::infrastructure::http::HttpConversationClient;
use legwork::infrastructure::storage::{InMemoryCorrelationStore, RedisCorrelationStore};
use legwork::interface::api::{build_router, init_metrics, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config path: first argument, else LEGWORK_CONFIG
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LEGWORK_CONFIG").ok())
        .map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting legwork");
    info!(
        "Configuration loaded: conversation service {:?}, storage {:?}",
        config.conversation_service, config.storage.backend
    );

    let store: Arc<dyn CorrelationStore> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory correlation store");
            Arc::new(InMemoryCorrelationStore::new())
        }
        StorageBackend::Redis => Arc::new(
            RedisCorrelationStore::connect(&config.storage.redis_url, config.storage_timeout())
                .await?,
        ),
    };

    let token = Some(config.conversation_service.token.clone());
    let service = Arc::new(HttpConversationClient::new(token, config.service_timeout())?);

    let context = RtcContext::new(
        store,
        service,
        config.endpoints(),
        config.call_flow_settings(),
    );

    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    let app = build_router(AppState::new(&context), prometheus_handle);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("REST API server started on {}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
