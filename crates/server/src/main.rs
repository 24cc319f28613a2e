use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::{contact_route, contact_status, contact_status_route, submit_contact};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ContactReply, ContactRequest, ContactStatus},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    if settings.contact_email.is_none() {
        warn!("CONTACT_EMAIL is not set; contact submissions will be rejected");
    }
    if settings.resend_api_key.is_none() {
        warn!("RESEND_API_KEY is not set; contact submissions will be rejected");
    }

    let state = AppState::from_settings(&settings);
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr = settings.bind_addr()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(contact_route(), post(http_submit_contact))
        .route(contact_status_route(), get(http_contact_status))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_contact_status(State(state): State<Arc<AppState>>) -> Json<ContactStatus> {
    Json(contact_status(&state.contact))
}

async fn http_submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> (StatusCode, Json<ContactReply>) {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let status = rejection.status();
            let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                ErrorCode::PayloadTooLarge
            } else {
                ErrorCode::Validation
            };
            let error = ApiError::new(code, rejection.body_text());
            return (status, Json(error.into()));
        }
    };

    match submit_contact(&state.contact, request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)),
        Err(error) => (status_for(error.code), Json(error.into())),
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::Delivery => StatusCode::BAD_GATEWAY,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
