//! Axum route handlers for the congestion API.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::congestion::loader::{Completion, LoadStatus};
use crate::congestion::slots::{resolve_slot, slot_labels};
use crate::congestion::view::{
    build_board, day_total, hourly_totals, CongestionBoard, CongestionView, HourlyPoint,
};
use crate::congestion::zones::{Area, Terminal};
use crate::errors::AppError;
use crate::forecast_client::{Forecast, ForecastDay};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    #[serde(default)]
    pub day: ForecastDay,
    pub slot: Option<String>,
    pub hour: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    #[serde(default)]
    pub day: ForecastDay,
    pub slot: Option<String>,
    #[serde(default)]
    pub area: Area,
    #[serde(default)]
    pub terminal: Terminal,
    pub hour: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    #[serde(default)]
    pub day: ForecastDay,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub day: ForecastDay,
    pub slots: Vec<String>,
    pub selected: Option<String>,
    /// True when the upstream fetch failed and previously loaded data is shown.
    pub stale: bool,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    #[serde(flatten)]
    pub board: CongestionBoard,
    pub stale: bool,
}

#[derive(Debug, Serialize)]
pub struct HourlyResponse {
    pub day: ForecastDay,
    pub points: Vec<HourlyPoint>,
    /// Aggregate row of the feed, when present.
    pub total: Option<HourlyPoint>,
    pub stale: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/congestion/slots
pub async fn handle_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let hour = resolve_hour(query.hour, state.config.local_utc_offset_hours)?;
    let (forecast, stale) = load_forecast(&state, query.day).await?;

    let slots = slot_labels(&forecast);
    let selected = resolve_slot(&slots, query.slot.as_deref(), hour);

    Ok(Json(SlotsResponse {
        day: query.day,
        slots,
        selected,
        stale,
    }))
}

/// GET /api/v1/congestion
pub async fn handle_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardResponse>, AppError> {
    let hour = resolve_hour(query.hour, state.config.local_utc_offset_hours)?;
    let (forecast, stale) = load_forecast(&state, query.day).await?;

    let view = CongestionView {
        day: query.day,
        slot: query.slot,
        area: query.area,
        terminal: query.terminal,
    };

    Ok(Json(BoardResponse {
        board: build_board(&view, &forecast, hour),
        stale,
    }))
}

/// GET /api/v1/congestion/hourly
pub async fn handle_hourly(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<HourlyResponse>, AppError> {
    let (forecast, stale) = load_forecast(&state, query.day).await?;
    Ok(Json(HourlyResponse {
        day: query.day,
        points: hourly_totals(&forecast),
        total: day_total(&forecast),
        stale,
    }))
}

/// GET /api/v1/congestion/status
/// State of the most recently issued forecast load.
pub async fn handle_status(State(state): State<AppState>) -> Json<LoadStatus<ForecastDay>> {
    Json(state.forecasts.lock().await.status())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Fetches the forecast for `day` through the shared loader.
///
/// On failure, the last good forecast for the same day is served with
/// `stale = true`; with nothing to fall back on the failure is returned.
async fn load_forecast(state: &AppState, day: ForecastDay) -> Result<(Arc<Forecast>, bool), AppError> {
    let ticket = state.forecasts.lock().await.begin(day);
    let result = state.forecast_client.fetch(day).await;

    let mut loader = state.forecasts.lock().await;
    match result {
        Ok(forecast) => {
            if forecast.is_empty() {
                debug!("Forecast for {day:?} has no hourly slots");
            }
            let forecast = Arc::new(forecast);
            if loader.complete(ticket, Ok(Arc::clone(&forecast))) == Completion::Stale {
                debug!("Forecast response for {day:?} superseded by a newer request");
            }
            Ok((forecast, false))
        }
        Err(e) => {
            loader.complete(ticket, Err(e.to_string()));
            match loader.latest_for(&day) {
                Some(previous) => {
                    warn!("Forecast fetch for {day:?} failed, serving previous data: {e}");
                    Ok((previous, true))
                }
                None => Err(e.into()),
            }
        }
    }
}

/// The requested hour, or the current hour at the configured UTC offset.
fn resolve_hour(requested: Option<u32>, utc_offset_hours: i32) -> Result<u32, AppError> {
    match requested {
        Some(hour) if hour < 24 => Ok(hour),
        Some(hour) => Err(AppError::Validation(format!(
            "hour must be between 0 and 23, got {hour}"
        ))),
        None => {
            let offset = utc_offset_hours
                .checked_mul(3600)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "invalid UTC offset of {utc_offset_hours} hours"
                    ))
                })?;
            Ok(Utc::now().with_timezone(&offset).hour())
        }
    }
}
