use anyhow::{bail, Context, Result};

const DEFAULT_PARKING_ENDPOINT: &str =
    "https://apis.data.go.kr/B551177/StatusOfParking/getTrackingParking";

/// Which post store backend the service talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store. Data lives as long as the process.
    Memory,
    /// Hosted realtime database reached over its REST interface.
    Rtdb { url: String, auth: Option<String> },
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub forecast_base_url: String,
    pub parking_endpoint: String,
    pub parking_service_key: String,
    pub auth_base_url: String,
    pub store_backend: StoreBackend,
    pub store_poll_interval_secs: u64,
    pub local_utc_offset_hours: i32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            forecast_base_url: require_env("FORECAST_BASE_URL")?,
            parking_endpoint: std::env::var("PARKING_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_PARKING_ENDPOINT.to_string()),
            parking_service_key: require_env("PARKING_SERVICE_KEY")?,
            auth_base_url: require_env("AUTH_BASE_URL")?,
            store_backend: store_backend_from_env()?,
            store_poll_interval_secs: std::env::var("STORE_POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u64>()
                .context("STORE_POLL_INTERVAL_SECS must be a whole number of seconds")?,
            local_utc_offset_hours: parse_utc_offset(
                &std::env::var("LOCAL_UTC_OFFSET_HOURS").unwrap_or_else(|_| "9".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration pointing every upstream at `base`. Used by tests.
    #[cfg(test)]
    pub fn for_testing(base: &str) -> Self {
        Config {
            forecast_base_url: base.to_string(),
            parking_endpoint: format!("{base}/parking"),
            parking_service_key: "test-key".to_string(),
            auth_base_url: base.to_string(),
            store_backend: StoreBackend::Memory,
            store_poll_interval_secs: 5,
            local_utc_offset_hours: 9,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn store_backend_from_env() -> Result<StoreBackend> {
    let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());
    match backend.as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "rtdb" => Ok(StoreBackend::Rtdb {
            url: require_env("RTDB_URL")?,
            auth: std::env::var("RTDB_AUTH").ok(),
        }),
        other => bail!("STORE_BACKEND must be 'memory' or 'rtdb', got '{other}'"),
    }
}

/// Whole-hour UTC offset, limited to the offsets in real use (-12..=14).
fn parse_utc_offset(raw: &str) -> Result<i32> {
    let hours = raw
        .trim()
        .parse::<i32>()
        .context("LOCAL_UTC_OFFSET_HOURS must be an integer")?;
    if !(-12..=14).contains(&hours) {
        bail!("LOCAL_UTC_OFFSET_HOURS must be between -12 and 14, got {hours}");
    }
    Ok(hours)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_offset_accepts_real_offsets() {
        assert_eq!(parse_utc_offset("9").unwrap(), 9);
        assert_eq!(parse_utc_offset("-12").unwrap(), -12);
        assert_eq!(parse_utc_offset(" 14 ").unwrap(), 14);
    }

    #[test]
    fn test_utc_offset_rejects_out_of_range() {
        assert!(parse_utc_offset("15").is_err());
        assert!(parse_utc_offset("-13").is_err());
        assert!(parse_utc_offset("2147483647").is_err());
        assert!(parse_utc_offset("nine").is_err());
    }
}
