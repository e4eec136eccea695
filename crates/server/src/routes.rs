//! HTTP adapters over the trainer service.
//!
//! Handlers extract, delegate, and serialize; scheduling logic stays in
//! the services crate.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use services::{TrainerError, TrainerService};
use trainer_core::model::{
    CurrentReminder, Drill, DrillId, Progress, Settings, SettingsPatch,
};

type AppState = Arc<TrainerService>;

/// Build the API router over a running trainer.
#[must_use]
pub fn router(trainer: Arc<TrainerService>) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/current", get(get_current))
        .route("/api/complete", post(complete))
        .route("/api/skip", post(skip))
        .route("/api/settings", post(update_settings))
        .route("/api/reset", post(reset))
        .route("/api/alert", post(alert))
        .with_state(trainer)
}

/// Bind `addr` and serve the API until the process exits.
///
/// # Errors
///
/// Returns the underlying I/O error if the listener cannot be bound or
/// serving fails.
pub async fn serve(addr: &str, trainer: Arc<TrainerService>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("trainer API listening on http://{local_addr}");
    axum::serve(listener, router(trainer)).await
}

//
// ─── PAYLOADS ──────────────────────────────────────────────────────────────────
//

/// The presented card: drill fields plus the exhausted marker.
#[derive(Debug, Serialize)]
struct CurrentCard {
    #[serde(flatten)]
    drill: Drill,
    all_complete: bool,
}

impl CurrentCard {
    fn from_reminder(reminder: &CurrentReminder) -> Self {
        Self {
            drill: reminder.card(),
            all_complete: reminder.is_all_complete(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompleteRequest {
    command: String,
}

/// Everything a front end needs to render the trainer view.
#[derive(Debug, Serialize)]
struct StateView {
    current: CurrentCard,
    settings: Settings,
    progress: Progress,
    history: Vec<Drill>,
    catalog_size: usize,
}

fn error_response(err: &TrainerError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        TrainerError::UnknownDrill(_) => StatusCode::NOT_FOUND,
        TrainerError::Settings(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TrainerError::EmptyCatalog => StatusCode::SERVICE_UNAVAILABLE,
        TrainerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

//
// ─── HANDLERS ──────────────────────────────────────────────────────────────────
//

async fn get_state(State(trainer): State<AppState>) -> impl IntoResponse {
    let snapshot = trainer.snapshot().await;
    Json(StateView {
        current: CurrentCard::from_reminder(&snapshot.current),
        settings: snapshot.settings,
        progress: snapshot.progress,
        history: snapshot.history,
        catalog_size: trainer.catalog().len(),
    })
}

async fn get_current(State(trainer): State<AppState>) -> impl IntoResponse {
    let reminder = trainer.current().await;
    Json(CurrentCard::from_reminder(&reminder))
}

async fn complete(
    State(trainer): State<AppState>,
    Json(body): Json<CompleteRequest>,
) -> impl IntoResponse {
    let id = DrillId::new(body.command);
    match trainer.mark_completed(&id).await {
        Ok(reminder) => {
            (StatusCode::OK, Json(CurrentCard::from_reminder(&reminder))).into_response()
        }
        Err(err) => error_response(&err).into_response(),
    }
}

async fn skip(State(trainer): State<AppState>) -> impl IntoResponse {
    let reminder = trainer.skip().await;
    Json(CurrentCard::from_reminder(&reminder))
}

async fn update_settings(
    State(trainer): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> impl IntoResponse {
    match trainer.update_settings(patch).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(err) => error_response(&err).into_response(),
    }
}

async fn reset(State(trainer): State<AppState>) -> impl IntoResponse {
    match trainer.reset_progress().await {
        Ok(reminder) => {
            (StatusCode::OK, Json(CurrentCard::from_reminder(&reminder))).into_response()
        }
        Err(err) => error_response(&err).into_response(),
    }
}

async fn alert(State(trainer): State<AppState>) -> impl IntoResponse {
    trainer.play_alert();
    Json(serde_json::json!({ "status": "ok" }))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
