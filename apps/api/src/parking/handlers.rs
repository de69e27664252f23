use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::congestion::zones::Terminal;
use crate::errors::AppError;
use crate::parking::occupancy::{lots_for, ParkingLot};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParkingQuery {
    pub terminal: Option<Terminal>,
}

#[derive(Debug, Serialize)]
pub struct ParkingResponse {
    pub lots: Vec<ParkingLot>,
}

/// GET /api/v1/parking
pub async fn handle_parking(
    State(state): State<AppState>,
    Query(query): Query<ParkingQuery>,
) -> Result<Json<ParkingResponse>, AppError> {
    let items = state.parking_client.fetch().await?;
    Ok(Json(ParkingResponse {
        lots: lots_for(&items, query.terminal),
    }))
}
