//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
};
use tracing::info;

use super::{
    error::ApiError,
    responses::{ActionResponse, HealthResponse, PressBody, PressQuery, StatusResponse},
};
use crate::{
    state::AppState,
    timer::{Button, ButtonEvent, Press},
};

async fn apply(
    state: &AppState,
    event: ButtonEvent,
    message: &str,
) -> Result<Json<ActionResponse>, ApiError> {
    let snapshot = state.dispatch(event).await?;
    Ok(Json(ActionResponse::new(message.to_string(), snapshot)))
}

/// Handle POST /toggle - Start or stop the timer
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    let snapshot = state.dispatch(ButtonEvent::Toggle).await?;
    let message = if snapshot.is_running() {
        "Timer started"
    } else {
        "Timer stopped"
    };
    info!("Toggle endpoint called - {}", message.to_lowercase());
    Ok(Json(ActionResponse::new(message.to_string(), snapshot)))
}

/// Handle POST /stretch/increase - Lengthen the stretch interval
pub async fn increase_stretch_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply(&state, ButtonEvent::IncreaseStretch, "Stretch duration increased").await
}

/// Handle POST /pause/increase - Lengthen the pause interval
pub async fn increase_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply(&state, ButtonEvent::IncreasePause, "Pause duration increased").await
}

/// Handle POST /stretch/reset - Restore the default stretch interval
pub async fn reset_stretch_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply(&state, ButtonEvent::ResetStretch, "Stretch duration reset").await
}

/// Handle POST /pause/reset - Restore the default pause interval
pub async fn reset_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, ApiError> {
    apply(&state, ButtonEvent::ResetPause, "Pause duration reset").await
}

/// Handle POST /button/:button - Simulate a physical button press
///
/// The hold time comes from a JSON body `{"held_ms": N}` or, failing that,
/// the `held_ms` query parameter. Neither means a single press.
pub async fn button_handler(
    State(state): State<Arc<AppState>>,
    Path(button): Path<String>,
    Query(query): Query<PressQuery>,
    body: Bytes,
) -> Result<Json<ActionResponse>, ApiError> {
    let button: Button = button
        .parse()
        .map_err(|_| ApiError::UnknownButton(button.clone()))?;

    let body_held_ms = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<PressBody>(&body)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))?
            .held_ms
    };
    let held = Duration::from_millis(body_held_ms.or(query.held_ms).unwrap_or(0));
    let press = Press::from_hold(held, state.settings.long_press_delay);

    let event = ButtonEvent::from_press(button, press)
        .ok_or(ApiError::UnboundPress { button, press })?;

    info!("Button endpoint called - {} {} press", press, button);
    let message = format!("{} {} press handled as {}", press, button, event.as_str());
    apply(&state, event, &message).await
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.current_snapshot(),
        settings: state.settings,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
