use std::future::Future;

use axum::Router;
use configs::ServerConfig;
use service::PostService;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::{build_router, AppState};

/// Resolves on Ctrl+C. If the handler cannot be installed the server just keeps running.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(service = "post-store", event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: bind the configured address and serve a freshly seeded store.
pub async fn run_with_config(cfg: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(PostService::in_memory());
    let app = build_router(state);

    let addr = cfg.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "post store listening");
    serve(listener, app, shutdown_signal()).await
}
