//! Recommended-zone flags: the least congested member(s) of each comparison group.

use crate::congestion::deriver::CongestionSnapshot;
use crate::congestion::zones::{descriptor, group_members, Area, GroupRule, ZoneId};

/// Whether `zone` is the best choice within its comparison group.
///
/// Ties are inclusive on both rules: equal pair members are both recommended,
/// and every member at the group minimum is recommended. Totals, zones outside
/// `area`, and zones missing from the snapshot are never recommended.
pub fn is_recommended(snapshot: &CongestionSnapshot, area: Area, zone: ZoneId) -> bool {
    let zone_desc = descriptor(zone);
    if zone_desc.area != area {
        return false;
    }
    let Some(group) = zone_desc.group else {
        return false;
    };
    let Some(value) = snapshot.zone(area, zone).map(|z| z.value) else {
        return false;
    };

    let mut others = group_members(group)
        .filter(|member| member.id != zone)
        .filter_map(|member| snapshot.zone(area, member.id).map(|z| z.value));

    match group.rule() {
        GroupRule::Pairwise => others.next().map_or(false, |other| value <= other),
        GroupRule::Joint => {
            let group_min = others.fold(value, u64::min);
            value == group_min
        }
    }
}

/// All recommended zones of `area`, in table order.
pub fn recommended_zones(snapshot: &CongestionSnapshot, area: Area) -> Vec<ZoneId> {
    snapshot
        .areas
        .get(&area)
        .map(|zones| {
            zones
                .keys()
                .copied()
                .filter(|id| is_recommended(snapshot, area, *id))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::congestion::deriver::derive_snapshot;
    use crate::forecast_client::ForecastSlot;

    fn departures(gates: [i64; 4]) -> CongestionSnapshot {
        derive_snapshot(&ForecastSlot {
            atime: "10_11".to_string(),
            t1sum5: gates[0],
            t1sum6: gates[1],
            t1sum7: gates[2],
            t1sum8: gates[3],
            ..Default::default()
        })
    }

    #[test]
    fn test_pair_lower_side_recommended() {
        let snapshot = derive_snapshot(&ForecastSlot {
            t1sum1: 200,
            t1sum2: 450,
            ..Default::default()
        });
        assert!(is_recommended(&snapshot, Area::Arrivals, ZoneId::T1ArrivalEast));
        assert!(!is_recommended(&snapshot, Area::Arrivals, ZoneId::T1ArrivalWest));
    }

    #[test]
    fn test_pair_tie_flags_both() {
        let snapshot = derive_snapshot(&ForecastSlot {
            t1sum3: 310,
            t1sum4: -310,
            t2sum1: 5,
            t2sum2: 5,
            t2sum3: 90,
            t2sum4: 90,
            ..Default::default()
        });
        assert!(is_recommended(&snapshot, Area::Arrivals, ZoneId::T1ImmigrationC));
        assert!(is_recommended(&snapshot, Area::Arrivals, ZoneId::T1ImmigrationD));
        assert!(is_recommended(&snapshot, Area::Arrivals, ZoneId::T2ArrivalHall1));
        assert!(is_recommended(&snapshot, Area::Arrivals, ZoneId::T2ArrivalHall2));
        assert!(is_recommended(&snapshot, Area::Departures, ZoneId::T2DepartureHall1));
        assert!(is_recommended(&snapshot, Area::Departures, ZoneId::T2DepartureHall2));
    }

    #[test]
    fn test_t1_departure_group_flags_every_minimum() {
        let snapshot = departures([100, 50, 50, 200]);
        assert_eq!(
            recommended_zones(&snapshot, Area::Departures)
                .into_iter()
                .filter(|id| descriptor(*id).group.is_some()
                    && descriptor(*id).terminal == crate::congestion::zones::Terminal::T1)
                .collect::<Vec<_>>(),
            vec![ZoneId::T1DepartureGate3, ZoneId::T1DepartureGate4]
        );
    }

    #[test]
    fn test_t1_departure_group_all_equal() {
        let snapshot = departures([100, 100, 100, 100]);
        for id in [
            ZoneId::T1DepartureGates12,
            ZoneId::T1DepartureGate3,
            ZoneId::T1DepartureGate4,
            ZoneId::T1DepartureGates56,
        ] {
            assert!(is_recommended(&snapshot, Area::Departures, id), "{id:?}");
        }
    }

    #[test]
    fn test_totals_never_recommended() {
        let snapshot = departures([0, 0, 0, 0]);
        assert!(!is_recommended(&snapshot, Area::Departures, ZoneId::T1DepartureTotal));
        assert!(!is_recommended(&snapshot, Area::Arrivals, ZoneId::T1ArrivalTotal));
        assert!(!recommended_zones(&snapshot, Area::Arrivals).contains(&ZoneId::T2ArrivalTotal));
    }

    #[test]
    fn test_zone_outside_area_not_recommended() {
        let snapshot = departures([0, 0, 0, 0]);
        assert!(!is_recommended(&snapshot, Area::Arrivals, ZoneId::T1DepartureGate3));
    }

    #[test]
    fn test_pairwise_rule_is_symmetric_tie_inclusive() {
        for (a, b) in [(0, 0), (1, 2), (600, 599), (42, 42)] {
            let snapshot = derive_snapshot(&ForecastSlot {
                t2sum1: a,
                t2sum2: b,
                ..Default::default()
            });
            let first = is_recommended(&snapshot, Area::Arrivals, ZoneId::T2ArrivalHall1);
            let second = is_recommended(&snapshot, Area::Arrivals, ZoneId::T2ArrivalHall2);
            assert_eq!(first, a <= b);
            assert_eq!(second, b <= a);
            assert!(first || second);
        }
    }
}
