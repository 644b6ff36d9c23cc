use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

pub mod routes;

use crate::{
    config::AppConfig,
    core::{classifier::WatsonClassifier, handler::EmotionService},
    utils::error::Result,
};
use routes::{emotion_detector_handler, index_handler, AppState};

pub fn router(service: EmotionService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/", get(index_handler))
        .route("/emotionDetector", get(emotion_detector_handler))
        .with_state(state)
}

/// 依設定建立 Watson client 與路由
pub fn build_app(config: &AppConfig) -> Result<Router> {
    let classifier = WatsonClassifier::new(config.classifier.clone())?;
    Ok(router(EmotionService::new(Arc::new(classifier))))
}

pub async fn start_server(config: AppConfig) -> Result<()> {
    info!("Classifier endpoint: {}", config.classifier.endpoint);
    let app = build_app(&config)?;

    let address = config.server.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
