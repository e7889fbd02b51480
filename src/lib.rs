pub mod api; // HTTP routes over the engine and the record store
pub mod config;
pub mod models;
pub mod scoring; // Symptom scoring, lab adjustment, cycle phase
pub mod store; // KV persistence for responses and emails

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] store::StoreError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

/// Run the survey API until Ctrl-C.
///
/// The store is built before the async runtime starts: the Upstash
/// client is blocking and must not be created or dropped inside it.
pub fn run() -> Result<(), RunError> {
    let development = config::is_development(std::env::var("APP_ENV").ok().as_deref());

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter(development))),
        )
        .init();

    let config = config::ServerConfig::from_env();
    tracing::info!(
        "{} starting v{} (store: {})",
        config::APP_NAME,
        config::APP_VERSION,
        match &config.store {
            config::StoreBackend::None => "none",
            config::StoreBackend::Memory => "memory",
            config::StoreBackend::Upstash { .. } => "upstash",
        }
    );

    let store: Option<Arc<dyn store::KvStore>> = store::from_config(&config)?;
    if store.is_none() {
        tracing::warn!("No store configured; persistence endpoints will answer 503");
    }

    let runtime = tokio::runtime::Runtime::new().map_err(RunError::Runtime)?;
    let result = runtime.block_on(api::server::serve(
        config.bind_addr,
        store.clone(),
        config.development,
        api::server::ctrl_c(),
    ));
    drop(runtime);
    drop(store);

    result.map_err(RunError::from)
}
