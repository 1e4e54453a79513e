//! HTTP surface: one GET endpoint serving the assembled report.

use crate::core::assembler::ApiResponse;
use crate::core::engine::ReportEngine;
use crate::core::{ConfigProvider, PageSource};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in self.headers {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    response.headers_mut().insert(name, value);
                }
                Err(e) => tracing::warn!("Dropping invalid header {}: {}", name, e),
            }
        }

        response
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn create_router<S, C>(engine: Arc<ReportEngine<S, C>>) -> Router
where
    S: PageSource + 'static,
    C: ConfigProvider + 'static,
{
    Router::new()
        .route("/", get(report::<S, C>))
        .route("/api/augsburg", get(report::<S, C>))
        .route("/health", get(health))
        .with_state(engine)
}

async fn report<S, C>(State(engine): State<Arc<ReportEngine<S, C>>>) -> ApiResponse
where
    S: PageSource + 'static,
    C: ConfigProvider + 'static,
{
    engine.respond().await
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
