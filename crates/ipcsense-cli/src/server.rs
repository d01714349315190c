//! HTTP server wiring

use ipcsense_classifiers::KeywordClassifier;
use ipcsense_llm::LlmClient;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use crate::analyzer::CaseAnalyzer;
use crate::routes::create_router;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<CaseAnalyzer>,
    pub llm: Arc<LlmClient>,
    pub suggester: Arc<KeywordClassifier>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        analyzer: CaseAnalyzer,
        llm: LlmClient,
        suggester: KeywordClassifier,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            llm: Arc::new(llm),
            suggester: Arc::new(suggester),
            metrics,
        }
    }
}

/// Serve the API until SIGINT or SIGTERM
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
