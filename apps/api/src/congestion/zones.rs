//! Static zone table: every congestion zone, the forecast column it reads, and
//! the comparison group it competes in. Shared by the deriver and the ranker so
//! neither has to match on display names.

use serde::{Deserialize, Serialize};

use crate::forecast_client::RawField;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Arrivals,
    #[default]
    Departures,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    #[default]
    T1,
    T2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    /// A physical hall or checkpoint.
    Section,
    /// Terminal-level aggregate. Classified but never compared.
    Total,
}

/// How the members of a comparison group are judged against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRule {
    /// Exactly two members; a member wins when it is `<=` the other.
    Pairwise,
    /// Any number of members; every member equal to the group minimum wins.
    Joint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonGroup {
    T1ArrivalHalls,
    T1Immigration,
    T2ArrivalHalls,
    T1DepartureGates,
    T2DepartureHalls,
}

impl ComparisonGroup {
    pub fn rule(self) -> GroupRule {
        match self {
            ComparisonGroup::T1DepartureGates => GroupRule::Joint,
            _ => GroupRule::Pairwise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    T1ArrivalEast,
    T1ArrivalWest,
    T1ImmigrationC,
    T1ImmigrationD,
    T1ArrivalTotal,
    T2ArrivalHall1,
    T2ArrivalHall2,
    T2ArrivalTotal,
    T1DepartureGates12,
    T1DepartureGate3,
    T1DepartureGate4,
    T1DepartureGates56,
    T1DepartureTotal,
    T2DepartureHall1,
    T2DepartureHall2,
    T2DepartureTotal,
}

#[derive(Debug, Clone, Copy)]
pub struct ZoneDescriptor {
    pub id: ZoneId,
    pub name: &'static str,
    pub area: Area,
    pub terminal: Terminal,
    pub field: RawField,
    pub kind: ZoneKind,
    pub group: Option<ComparisonGroup>,
}

const fn section(
    id: ZoneId,
    name: &'static str,
    area: Area,
    terminal: Terminal,
    field: RawField,
    group: ComparisonGroup,
) -> ZoneDescriptor {
    ZoneDescriptor {
        id,
        name,
        area,
        terminal,
        field,
        kind: ZoneKind::Section,
        group: Some(group),
    }
}

const fn total(
    id: ZoneId,
    name: &'static str,
    area: Area,
    terminal: Terminal,
    field: RawField,
) -> ZoneDescriptor {
    ZoneDescriptor {
        id,
        name,
        area,
        terminal,
        field,
        kind: ZoneKind::Total,
        group: None,
    }
}

/// Every zone, in display order.
pub static ZONES: [ZoneDescriptor; 16] = [
    section(
        ZoneId::T1ArrivalEast,
        "T1 arrival hall east (A,B)",
        Area::Arrivals,
        Terminal::T1,
        RawField::T1Sum1,
        ComparisonGroup::T1ArrivalHalls,
    ),
    section(
        ZoneId::T1ArrivalWest,
        "T1 arrival hall west (E,F)",
        Area::Arrivals,
        Terminal::T1,
        RawField::T1Sum2,
        ComparisonGroup::T1ArrivalHalls,
    ),
    section(
        ZoneId::T1ImmigrationC,
        "T1 immigration (C)",
        Area::Arrivals,
        Terminal::T1,
        RawField::T1Sum3,
        ComparisonGroup::T1Immigration,
    ),
    section(
        ZoneId::T1ImmigrationD,
        "T1 immigration (D)",
        Area::Arrivals,
        Terminal::T1,
        RawField::T1Sum4,
        ComparisonGroup::T1Immigration,
    ),
    total(
        ZoneId::T1ArrivalTotal,
        "T1 arrivals total",
        Area::Arrivals,
        Terminal::T1,
        RawField::T1SumSet1,
    ),
    section(
        ZoneId::T2ArrivalHall1,
        "T2 arrival hall 1",
        Area::Arrivals,
        Terminal::T2,
        RawField::T2Sum1,
        ComparisonGroup::T2ArrivalHalls,
    ),
    section(
        ZoneId::T2ArrivalHall2,
        "T2 arrival hall 2",
        Area::Arrivals,
        Terminal::T2,
        RawField::T2Sum2,
        ComparisonGroup::T2ArrivalHalls,
    ),
    total(
        ZoneId::T2ArrivalTotal,
        "T2 arrivals total",
        Area::Arrivals,
        Terminal::T2,
        RawField::T2SumSet1,
    ),
    section(
        ZoneId::T1DepartureGates12,
        "T1 departure gates 1,2",
        Area::Departures,
        Terminal::T1,
        RawField::T1Sum5,
        ComparisonGroup::T1DepartureGates,
    ),
    section(
        ZoneId::T1DepartureGate3,
        "T1 departure gate 3",
        Area::Departures,
        Terminal::T1,
        RawField::T1Sum6,
        ComparisonGroup::T1DepartureGates,
    ),
    section(
        ZoneId::T1DepartureGate4,
        "T1 departure gate 4",
        Area::Departures,
        Terminal::T1,
        RawField::T1Sum7,
        ComparisonGroup::T1DepartureGates,
    ),
    section(
        ZoneId::T1DepartureGates56,
        "T1 departure gates 5,6",
        Area::Departures,
        Terminal::T1,
        RawField::T1Sum8,
        ComparisonGroup::T1DepartureGates,
    ),
    total(
        ZoneId::T1DepartureTotal,
        "T1 departures total",
        Area::Departures,
        Terminal::T1,
        RawField::T1SumSet2,
    ),
    section(
        ZoneId::T2DepartureHall1,
        "T2 departure hall 1",
        Area::Departures,
        Terminal::T2,
        RawField::T2Sum3,
        ComparisonGroup::T2DepartureHalls,
    ),
    section(
        ZoneId::T2DepartureHall2,
        "T2 departure hall 2",
        Area::Departures,
        Terminal::T2,
        RawField::T2Sum4,
        ComparisonGroup::T2DepartureHalls,
    ),
    total(
        ZoneId::T2DepartureTotal,
        "T2 departures total",
        Area::Departures,
        Terminal::T2,
        RawField::T2SumSet2,
    ),
];

pub fn descriptor(id: ZoneId) -> &'static ZoneDescriptor {
    // ZoneId variants are declared in table order.
    &ZONES[id as usize]
}

pub fn zones_in(area: Area) -> impl Iterator<Item = &'static ZoneDescriptor> {
    ZONES.iter().filter(move |z| z.area == area)
}

pub fn group_members(group: ComparisonGroup) -> impl Iterator<Item = &'static ZoneDescriptor> {
    ZONES.iter().filter(move |z| z.group == Some(group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_descriptor_lookup_matches_table_order() {
        for zone in ZONES.iter() {
            assert_eq!(descriptor(zone.id).id, zone.id);
        }
    }

    #[test]
    fn test_every_raw_field_mapped_once() {
        let fields: HashSet<_> = ZONES.iter().map(|z| z.field).collect();
        assert_eq!(fields.len(), 16);
    }

    #[test]
    fn test_pairwise_groups_have_two_members() {
        for group in [
            ComparisonGroup::T1ArrivalHalls,
            ComparisonGroup::T1Immigration,
            ComparisonGroup::T2ArrivalHalls,
            ComparisonGroup::T2DepartureHalls,
        ] {
            assert_eq!(group.rule(), GroupRule::Pairwise);
            assert_eq!(group_members(group).count(), 2, "{group:?}");
        }
        assert_eq!(group_members(ComparisonGroup::T1DepartureGates).count(), 4);
    }

    #[test]
    fn test_totals_have_no_group() {
        for zone in ZONES.iter().filter(|z| z.kind == ZoneKind::Total) {
            assert!(zone.group.is_none());
        }
    }

    #[test]
    fn test_groups_stay_within_one_area_and_terminal() {
        for zone in ZONES.iter() {
            if let Some(group) = zone.group {
                for member in group_members(group) {
                    assert_eq!(member.area, zone.area);
                    assert_eq!(member.terminal, zone.terminal);
                }
            }
        }
    }
}
