use chrono::NaiveDateTime;
use serde::Serialize;

use crate::congestion::deriver::CongestionLevel;
use crate::congestion::zones::Terminal;
use crate::parking::ParkingItem;

/// Occupancy rate (percent) from which a lot counts as moderately busy.
const MODERATE_FROM_PERCENT: f64 = 70.0;
/// Occupancy rate (percent) from which a lot counts as congested.
const CONGESTED_FROM_PERCENT: f64 = 90.0;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y%m%d%H%M%S%.f",
    "%Y%m%d%H%M%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingLot {
    pub floor: String,
    pub occupied: i64,
    pub capacity: i64,
    /// Capped at 100 even when the feed reports more cars than spaces.
    pub occupancy_percent: f64,
    pub level: CongestionLevel,
    pub remaining: i64,
    pub full: bool,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<&ParkingItem> for ParkingLot {
    fn from(item: &ParkingItem) -> Self {
        let occupied = item.parking.max(0);
        let capacity = item.parkingarea.max(0);
        let remaining = capacity - occupied;
        let rate = occupancy_rate(occupied, capacity);
        ParkingLot {
            floor: item.floor.clone(),
            occupied,
            capacity,
            occupancy_percent: rate.min(100.0),
            level: occupancy_level(rate),
            remaining,
            full: remaining <= 0,
            updated_at: parse_timestamp(&item.datetm),
        }
    }
}

fn occupancy_rate(occupied: i64, capacity: i64) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    occupied as f64 / capacity as f64 * 100.0
}

pub fn occupancy_level(rate_percent: f64) -> CongestionLevel {
    if rate_percent < MODERATE_FROM_PERCENT {
        CongestionLevel::Relaxed
    } else if rate_percent < CONGESTED_FROM_PERCENT {
        CongestionLevel::Moderate
    } else {
        CongestionLevel::Congested
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Whether a feed row belongs to `terminal`, judged by its floor name.
pub fn belongs_to(item: &ParkingItem, terminal: Terminal) -> bool {
    let markers: [&str; 2] = match terminal {
        Terminal::T1 => ["T1", "제1"],
        Terminal::T2 => ["T2", "제2"],
    };
    markers.iter().any(|marker| item.floor.contains(marker))
}

pub fn lots_for(items: &[ParkingItem], terminal: Option<Terminal>) -> Vec<ParkingLot> {
    items
        .iter()
        .filter(|item| terminal.map_or(true, |t| belongs_to(item, t)))
        .map(ParkingLot::from)
        .collect()
}
