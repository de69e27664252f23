use std::collections::BTreeMap;

use serde::Serialize;

use crate::congestion::slots::format_time_range;
use crate::congestion::zones::{Area, ZoneId, ZoneKind, ZONES};
use crate::forecast_client::ForecastSlot;

/// Lower bound (inclusive) of the moderate band.
pub const MODERATE_FROM: u64 = 300;
/// Lower bound (inclusive) of the congested band.
pub const CONGESTED_FROM: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Relaxed,
    Moderate,
    Congested,
}

/// Classifies a passenger count. Boundaries are inclusive-low.
pub fn classify(passengers: u64) -> CongestionLevel {
    if passengers < MODERATE_FROM {
        CongestionLevel::Relaxed
    } else if passengers < CONGESTED_FROM {
        CongestionLevel::Moderate
    } else {
        CongestionLevel::Congested
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongestionZone {
    pub id: ZoneId,
    pub name: &'static str,
    pub kind: ZoneKind,
    pub level: CongestionLevel,
    pub value: u64,
}

/// Per-area zone readings for a single time slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongestionSnapshot {
    pub slot: String,
    pub areas: BTreeMap<Area, BTreeMap<ZoneId, CongestionZone>>,
}

impl CongestionSnapshot {
    pub fn zone(&self, area: Area, id: ZoneId) -> Option<&CongestionZone> {
        self.areas.get(&area).and_then(|zones| zones.get(&id))
    }

}

/// Maps one raw forecast row to classified zones, totals included.
pub fn derive_snapshot(row: &ForecastSlot) -> CongestionSnapshot {
    let mut areas: BTreeMap<Area, BTreeMap<ZoneId, CongestionZone>> = BTreeMap::new();

    for zone in ZONES.iter() {
        let value = row.count(zone.field);
        areas.entry(zone.area).or_default().insert(
            zone.id,
            CongestionZone {
                id: zone.id,
                name: zone.name,
                kind: zone.kind,
                level: classify(value),
                value,
            },
        );
    }

    CongestionSnapshot {
        slot: format_time_range(&row.atime),
        areas,
    }
}
