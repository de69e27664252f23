//! Axum route handlers for the airport directories.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::airport::airlines::{counters_for, AirlineCounter};
use crate::airport::facilities::{facilities_for, Facility, FACILITY_CATEGORIES};
use crate::congestion::zones::Terminal;

#[derive(Debug, Deserialize)]
pub struct FacilityQuery {
    #[serde(default)]
    pub terminal: Terminal,
    pub category: Option<String>,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct AirlineQuery {
    #[serde(default)]
    pub terminal: Terminal,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct FacilitiesResponse {
    pub categories: &'static [&'static str],
    pub facilities: Vec<Facility>,
}

/// GET /api/v1/airport/facilities
pub async fn handle_facilities(Query(query): Query<FacilityQuery>) -> Json<FacilitiesResponse> {
    Json(FacilitiesResponse {
        categories: &FACILITY_CATEGORIES,
        facilities: facilities_for(query.terminal, query.category.as_deref(), &query.q),
    })
}

/// GET /api/v1/airport/airlines
pub async fn handle_airlines(Query(query): Query<AirlineQuery>) -> Json<Vec<AirlineCounter>> {
    Json(counters_for(query.terminal, &query.q))
}
