//! Immutable view-state and the board derived from it.

use serde::{Deserialize, Serialize};

use crate::congestion::deriver::{derive_snapshot, CongestionLevel};
use crate::congestion::ranker::recommended_zones;
use crate::congestion::slots::{find_slot, format_time_range, resolve_slot, slot_labels};
use crate::congestion::zones::{zones_in, Area, Terminal, ZoneId, ZoneKind};
use crate::forecast_client::{Forecast, ForecastDay, ForecastSlot, RawField};

/// What the caller is looking at. Passed by value into derivations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CongestionView {
    pub day: ForecastDay,
    pub slot: Option<String>,
    pub area: Area,
    pub terminal: Terminal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardZone {
    pub id: ZoneId,
    pub name: &'static str,
    pub level: CongestionLevel,
    pub value: u64,
    pub recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongestionBoard {
    pub day: ForecastDay,
    pub area: Area,
    pub terminal: Terminal,
    pub slots: Vec<String>,
    /// `None` until the forecast has at least one hourly slot.
    pub slot: Option<String>,
    pub zones: Vec<BoardZone>,
    pub total: Option<BoardZone>,
}

/// Resolves the slot for `view` and lists the zones of its terminal and area.
pub fn build_board(view: &CongestionView, forecast: &Forecast, hour: u32) -> CongestionBoard {
    let slots = slot_labels(forecast);
    let slot = resolve_slot(&slots, view.slot.as_deref(), hour);

    let mut zones = Vec::new();
    let mut total = None;

    if let Some(row) = slot.as_deref().and_then(|label| find_slot(forecast, label)) {
        let snapshot = derive_snapshot(row);
        let recommended = recommended_zones(&snapshot, view.area);
        for zone in zones_in(view.area).filter(|z| z.terminal == view.terminal) {
            let Some(reading) = snapshot.zone(view.area, zone.id) else {
                continue;
            };
            let board_zone = BoardZone {
                id: zone.id,
                name: zone.name,
                level: reading.level,
                value: reading.value,
                recommended: recommended.contains(&zone.id),
            };
            match zone.kind {
                ZoneKind::Section => zones.push(board_zone),
                ZoneKind::Total => total = Some(board_zone),
            }
        }
    }

    CongestionBoard {
        day: view.day,
        area: view.area,
        terminal: view.terminal,
        slots,
        slot,
        zones,
        total,
    }
}

/// One point of the hourly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyPoint {
    pub slot: String,
    pub t1_arrivals: u64,
    pub t1_departures: u64,
    pub t2_arrivals: u64,
    pub t2_departures: u64,
}

fn point(row: &ForecastSlot) -> HourlyPoint {
    HourlyPoint {
        slot: format_time_range(&row.atime),
        t1_arrivals: row.count(RawField::T1SumSet1),
        t1_departures: row.count(RawField::T1SumSet2),
        t2_arrivals: row.count(RawField::T2SumSet1),
        t2_departures: row.count(RawField::T2SumSet2),
    }
}

pub fn hourly_totals(forecast: &Forecast) -> Vec<HourlyPoint> {
    forecast.slots().map(point).collect()
}

/// Whole-day totals from the aggregate row, when the feed has one.
pub fn day_total(forecast: &Forecast) -> Option<HourlyPoint> {
    forecast.total().map(point)
}
