//! HTTP request handlers.

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

use quotes_types::Configuration;

pub const SERVICE_NAME: &str = "Quote Editor";
pub const SERVICE_DESCRIPTION: &str = "Create and manage project quotes with clarity and speed.";

/// Application state shared across handlers.
pub struct AppState {
    pub config: Configuration,
}

/// Service information returned from the root endpoint.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub environment: String,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Service name, description, and running environment.
#[tracing::instrument(skip(state))]
pub async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        description: SERVICE_DESCRIPTION,
        environment: state.config.node_env.to_string(),
    })
}
