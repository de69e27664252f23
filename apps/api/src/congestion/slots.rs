//! Time slot labelling and selection.

use crate::forecast_client::{is_total_key, Forecast, ForecastSlot};

/// Turns a raw slot key (`"HH_..."`) into its display label (`"HH:00 ~ HH+1:00"`).
///
/// The aggregate key passes through unchanged, as does a key whose start is not
/// an hour or has no following hour. The end hour is not wrapped past midnight.
pub fn format_time_range(key: &str) -> String {
    if is_total_key(key) {
        return key.to_string();
    }
    let start = key.split('_').next().unwrap_or(key);
    match start.trim().parse::<u32>() {
        Ok(hour) => match hour.checked_add(1) {
            Some(end) => format!("{hour:02}:00 ~ {end:02}:00"),
            None => key.to_string(),
        },
        Err(_) => key.to_string(),
    }
}

/// Start hour of a display label, e.g. `10` for `"10:00 ~ 11:00"`.
pub fn slot_start_hour(label: &str) -> Option<u32> {
    label.split(':').next()?.trim().parse().ok()
}

/// Display labels of every hourly slot, in feed order.
pub fn slot_labels(forecast: &Forecast) -> Vec<String> {
    forecast
        .slots()
        .map(|slot| format_time_range(&slot.atime))
        .collect()
}

/// The hourly row whose label is `label`.
pub fn find_slot<'a>(forecast: &'a Forecast, label: &str) -> Option<&'a ForecastSlot> {
    forecast
        .slots()
        .find(|slot| format_time_range(&slot.atime) == label)
}

/// Picks the slot starting at `hour`, else the first slot. `None` when there are no slots.
pub fn select_current_slot(labels: &[String], hour: u32) -> Option<String> {
    labels
        .iter()
        .find(|label| slot_start_hour(label) == Some(hour))
        .or_else(|| labels.first())
        .cloned()
}

/// Keeps `current` when it still names one of `labels`; otherwise selects afresh.
pub fn resolve_slot(labels: &[String], current: Option<&str>, hour: u32) -> Option<String> {
    match current {
        Some(current) if labels.iter().any(|label| label == current) => Some(current.to_string()),
        _ => select_current_slot(labels, hour),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["09:00 ~ 10:00".to_string(), "10:00 ~ 11:00".to_string()]
    }

    #[test]
    fn test_format_time_range() {
        assert_eq!(format_time_range("09_10"), "09:00 ~ 10:00");
        assert_eq!(format_time_range("9_10"), "09:00 ~ 10:00");
        assert_eq!(format_time_range("22_23"), "22:00 ~ 23:00");
        assert_eq!(format_time_range("23_24"), "23:00 ~ 24:00");
        assert_eq!(format_time_range("4294967295_"), "4294967295_");
        assert_eq!(format_time_range("합계"), "합계");
        assert_eq!(format_time_range("TOTAL"), "TOTAL");
        assert_eq!(format_time_range("late_shift"), "late_shift");
    }

    #[test]
    fn test_slot_start_hour() {
        assert_eq!(slot_start_hour("10:00 ~ 11:00"), Some(10));
        assert_eq!(slot_start_hour("TOTAL"), None);
    }

    #[test]
    fn test_select_matching_hour() {
        assert_eq!(
            select_current_slot(&labels(), 10),
            Some("10:00 ~ 11:00".to_string())
        );
    }

    #[test]
    fn test_select_falls_back_to_first() {
        assert_eq!(
            select_current_slot(&labels(), 14),
            Some("09:00 ~ 10:00".to_string())
        );
    }

    #[test]
    fn test_select_empty_is_none() {
        assert_eq!(select_current_slot(&[], 10), None);
        assert_eq!(resolve_slot(&[], Some("10:00 ~ 11:00"), 10), None);
    }

    #[test]
    fn test_resolve_keeps_valid_selection() {
        let chosen = resolve_slot(&labels(), Some("09:00 ~ 10:00"), 10);
        assert_eq!(chosen, Some("09:00 ~ 10:00".to_string()));
        // idempotent
        assert_eq!(resolve_slot(&labels(), chosen.as_deref(), 10), chosen);
    }

    #[test]
    fn test_resolve_replaces_unknown_selection() {
        assert_eq!(
            resolve_slot(&labels(), Some("18:00 ~ 19:00"), 10),
            Some("10:00 ~ 11:00".to_string())
        );
    }

    #[test]
    fn test_labels_skip_total_row() {
        let forecast = Forecast::new(vec![
            ForecastSlot {
                atime: "09_10".to_string(),
                ..Default::default()
            },
            ForecastSlot {
                atime: "합계".to_string(),
                ..Default::default()
            },
        ]);
        assert_eq!(slot_labels(&forecast), vec!["09:00 ~ 10:00".to_string()]);
        assert!(find_slot(&forecast, "09:00 ~ 10:00").is_some());
        assert!(find_slot(&forecast, "합계").is_none());
    }
}
