//! HTTP front end that forwards requests to the image service executable.

mod outcome;
mod runner;

pub use outcome::ServiceOutcome;
pub use runner::{Mode, ServiceBinary};

use crate::Config;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde_derive::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UploadRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WatermarkRequest {
    pub image_path: String,
    pub watermark_path: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ServiceBinary>,
}

impl AppState {
    pub fn new(service: ServiceBinary) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ServiceBinary::new(&config.service_binary).with_args(&config.service_args))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/testImageUpload", post(upload))
        .route("/testWatermarkImage", post(watermark))
        .route("/health", get(health))
        .with_state(state)
}

async fn upload(State(state): State<AppState>, Json(req): Json<UploadRequest>) -> Response {
    let mut args = vec![req.content, req.kind];
    args.extend(req.filename.filter(|f| !f.is_empty()));
    forward(&state, Mode::Upload, &args).await
}

async fn watermark(State(state): State<AppState>, Json(req): Json<WatermarkRequest>) -> Response {
    let mut args = vec![req.image_path, req.watermark_path];
    args.extend(req.filename.filter(|f| !f.is_empty()));
    forward(&state, Mode::Watermark, &args).await
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn forward(state: &AppState, mode: Mode, args: &[String]) -> Response {
    match state.service.invoke(mode, args).await {
        Ok(outcome) => {
            match &outcome {
                ServiceOutcome::Success(_) => info!("Processed {}", mode),
                ServiceOutcome::Failure { error } => error!("{} reported failure: {}", mode, error),
            }
            outcome.into_response()
        }
        Err(e) => {
            error!("{} failed: {}", mode, e);
            ServiceOutcome::failure(e.to_string()).into_response()
        }
    }
}
