//! API handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::AppState;
use crate::catalog::Fetched;
use crate::types::ContactForm;

/// Response header naming where the body's data came from
pub const DATA_SOURCE_HEADER: HeaderName = HeaderName::from_static("x-data-source");

pub const CONTACT_SUCCESS_MESSAGE: &str = "Your message has been sent successfully!";

fn respond<T: Serialize>(fetched: Fetched<T>) -> Response {
    (
        [(DATA_SOURCE_HEADER, fetched.source.as_str())],
        Json(fetched.value),
    )
        .into_response()
}

/// Liveness check with store mode
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = if state.has_store() {
        "configured"
    } else {
        "fallback"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

pub async fn list_projects(State(state): State<AppState>) -> Response {
    respond(state.catalog.projects().await)
}

/// Single project by id
///
/// Unknown or non-numeric ids answer 200 with an empty project.
pub async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    respond(state.catalog.project(&id).await)
}

pub async fn get_profile(State(state): State<AppState>) -> Response {
    respond(state.catalog.profile().await)
}

pub async fn list_services(State(state): State<AppState>) -> Response {
    respond(state.catalog.services().await)
}

/// Accept a contact form submission
///
/// The body is decoded regardless of its content type.
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContactResponse>, (StatusCode, String)> {
    let form: ContactForm = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting contact form with invalid body");
        (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
    })?;

    state.catalog.save_contact(&form).await.map_err(|_| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save contact form".to_string(),
        )
    })?;

    Ok(Json(ContactResponse {
        message: CONTACT_SUCCESS_MESSAGE.to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}
