//! Fetches the airport's hourly passenger forecast.
//!
//! One attempt per call, no retry.

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Aggregate row key as documented for the feed.
pub const TOTAL_SENTINEL: &str = "TOTAL";
/// Aggregate row key as the live feed actually emits it.
const LOCALIZED_TOTAL_SENTINEL: &str = "합계";

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("forecast source returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which day's forecast to request. Encoded upstream as `selectdate=1|2|3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastDay {
    #[default]
    Today,
    Tomorrow,
    DayAfter,
}

impl ForecastDay {
    pub fn select_date(self) -> u8 {
        match self {
            ForecastDay::Today => 1,
            ForecastDay::Tomorrow => 2,
            ForecastDay::DayAfter => 3,
        }
    }
}

/// The sixteen passenger-count columns of a forecast row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawField {
    T1SumSet1,
    T1SumSet2,
    T2SumSet1,
    T2SumSet2,
    T1Sum1,
    T1Sum2,
    T1Sum3,
    T1Sum4,
    T1Sum5,
    T1Sum6,
    T1Sum7,
    T1Sum8,
    T2Sum1,
    T2Sum2,
    T2Sum3,
    T2Sum4,
}

/// One raw time bucket of the forecast feed.
///
/// Counts are kept signed exactly as received; the feed occasionally emits
/// negative values and consumers take the absolute value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    pub atime: String,
    #[serde(default, deserialize_with = "de_count")]
    pub t1sumset1: i64, // T1 arrivals total
    #[serde(default, deserialize_with = "de_count")]
    pub t1sumset2: i64, // T1 departures total
    #[serde(default, deserialize_with = "de_count")]
    pub t2sumset1: i64, // T2 arrivals total
    #[serde(default, deserialize_with = "de_count")]
    pub t2sumset2: i64, // T2 departures total
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum1: i64, // T1 arrival hall east (A,B)
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum2: i64, // T1 arrival hall west (E,F)
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum3: i64, // T1 immigration C
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum4: i64, // T1 immigration D
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum5: i64, // T1 departure gates 1,2
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum6: i64, // T1 departure gate 3
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum7: i64, // T1 departure gate 4
    #[serde(default, deserialize_with = "de_count")]
    pub t1sum8: i64, // T1 departure gates 5,6
    #[serde(default, deserialize_with = "de_count")]
    pub t2sum1: i64, // T2 arrival hall 1
    #[serde(default, deserialize_with = "de_count")]
    pub t2sum2: i64, // T2 arrival hall 2
    #[serde(default, deserialize_with = "de_count")]
    pub t2sum3: i64, // T2 departure hall 1
    #[serde(default, deserialize_with = "de_count")]
    pub t2sum4: i64, // T2 departure hall 2
}

impl ForecastSlot {
    pub fn is_total(&self) -> bool {
        is_total_key(&self.atime)
    }

    /// Raw (possibly negative) value of one column.
    pub fn raw(&self, field: RawField) -> i64 {
        match field {
            RawField::T1SumSet1 => self.t1sumset1,
            RawField::T1SumSet2 => self.t1sumset2,
            RawField::T2SumSet1 => self.t2sumset1,
            RawField::T2SumSet2 => self.t2sumset2,
            RawField::T1Sum1 => self.t1sum1,
            RawField::T1Sum2 => self.t1sum2,
            RawField::T1Sum3 => self.t1sum3,
            RawField::T1Sum4 => self.t1sum4,
            RawField::T1Sum5 => self.t1sum5,
            RawField::T1Sum6 => self.t1sum6,
            RawField::T1Sum7 => self.t1sum7,
            RawField::T1Sum8 => self.t1sum8,
            RawField::T2Sum1 => self.t2sum1,
            RawField::T2Sum2 => self.t2sum2,
            RawField::T2Sum3 => self.t2sum3,
            RawField::T2Sum4 => self.t2sum4,
        }
    }

    /// Passenger count of one column, normalized to a non-negative value.
    pub fn count(&self, field: RawField) -> u64 {
        self.raw(field).unsigned_abs()
    }
}

pub fn is_total_key(key: &str) -> bool {
    key == TOTAL_SENTINEL || key == LOCALIZED_TOTAL_SENTINEL
}

/// A full day's forecast in feed order, aggregate row included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forecast {
    pub rows: Vec<ForecastSlot>,
}

impl Forecast {
    pub fn new(rows: Vec<ForecastSlot>) -> Self {
        Self { rows }
    }

    /// Hourly rows in feed order, aggregate row excluded.
    pub fn slots(&self) -> impl Iterator<Item = &ForecastSlot> {
        self.rows.iter().filter(|row| !row.is_total())
    }

    pub fn total(&self) -> Option<&ForecastSlot> {
        self.rows.iter().find(|row| row.is_total())
    }

    pub fn is_empty(&self) -> bool {
        self.slots().next().is_none()
    }

    /// Extracts the rows from a raw response body.
    /// A body without `body.items.item` is an empty forecast, not an error.
    pub fn from_response(value: &Value) -> Result<Self, serde_json::Error> {
        let items = value
            .pointer("/body/items/item")
            .or_else(|| value.pointer("/response/body/items/item"));

        let rows = match items {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| ForecastSlot::deserialize(item))
                .collect::<Result<Vec<_>, _>>()?,
            Some(item @ Value::Object(_)) => vec![ForecastSlot::deserialize(item)?],
            _ => Vec::new(),
        };

        Ok(Self::new(rows))
    }
}

/// Accepts integers, floats (truncated) and numeric strings. Anything else counts as zero.
pub(crate) fn de_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
        _ => 0,
    })
}

/// HTTP client for the passenger forecast source.
#[derive(Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET {base}/passenger-notice?selectdate={1|2|3}
    pub async fn fetch(&self, day: ForecastDay) -> Result<Forecast, ForecastError> {
        let url = format!("{}/passenger-notice", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("selectdate", day.select_date())])
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ForecastError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let forecast = Forecast::from_response(&body)?;

        debug!(
            "Fetched passenger forecast for {:?}: {} rows",
            day,
            forecast.rows.len()
        );

        Ok(forecast)
    }
}
