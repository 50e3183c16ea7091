use anyhow::{Context, Result};
use image_service::functions::{router, AppState};
use image_service::util::init_logging;
use image_service::Config;
use log::{error, info};
use tokio::net::TcpListener;
use try_traits::default::TryDefault;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::try_default()?;
    let _logger = init_logging(&cfg.log_spec)?;
    info!("Starting image functions");

    let app = router(AppState::from_config(&cfg));
    let addr = cfg.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(
        "Listening on {}, forwarding to {}",
        listener.local_addr()?,
        cfg.service_binary.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
