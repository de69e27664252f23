//! Parking status: a fixed-page read of the parking authority's occupancy feed.

pub mod handlers;
pub mod occupancy;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::forecast_client::de_count;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const PAGE_SIZE: &str = "10";

#[derive(Debug, Error)]
pub enum ParkingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("parking source returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One row of the parking feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingItem {
    pub floor: String,
    /// Occupied spaces.
    #[serde(default, deserialize_with = "de_count")]
    pub parking: i64,
    /// Capacity.
    #[serde(default, deserialize_with = "de_count")]
    pub parkingarea: i64,
    #[serde(default)]
    pub datetm: String,
}

/// Pulls `response.body.items` out of a feed body. Missing items mean an empty list.
pub fn items_from_response(value: &Value) -> Result<Vec<ParkingItem>, serde_json::Error> {
    let items = value
        .pointer("/response/body/items")
        .or_else(|| value.pointer("/body/items"));

    match items {
        Some(Value::Array(items)) => items.iter().map(ParkingItem::deserialize).collect(),
        Some(wrapper @ Value::Object(_)) => match wrapper.get("item") {
            Some(Value::Array(items)) => items.iter().map(ParkingItem::deserialize).collect(),
            Some(item @ Value::Object(_)) => Ok(vec![ParkingItem::deserialize(item)?]),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}

#[derive(Clone)]
pub struct ParkingClient {
    client: Client,
    endpoint: String,
    service_key: String,
}

impl ParkingClient {
    pub fn new(endpoint: String, service_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            service_key,
        }
    }

    /// GET {endpoint}?serviceKey=..&numOfRows=10&pageNo=1&type=json
    pub async fn fetch(&self) -> Result<Vec<ParkingItem>, ParkingError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("numOfRows", PAGE_SIZE),
                ("pageNo", "1"),
                ("type", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParkingError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let items = items_from_response(&body)?;
        debug!("Fetched {} parking rows", items.len());
        Ok(items)
    }
}
