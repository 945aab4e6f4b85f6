use serde::{Serialize, Deserialize, Deserializer};
use serde::de::{DeserializeOwned, Error as _};

pub mod bar_chart;
pub mod config;
pub mod error;
pub mod palette;
pub mod ports;
pub mod winrates;

#[cfg(test)]
mod fake;

pub use config::{SChartOptions, SChartOptionsOverride};
pub use error::{EWidgetError, WidgetResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SSeriesItem {
    pub name: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SSeriesPayload {
    pub data: Vec<SSeriesItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SLeader {
    pub name: String,
    pub art: String,
}

// -- winrate and matches are absent when the pair never met, those cells render as N/A
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SOpponentResult {
    pub name: String,
    #[serde(default)]
    pub winrate: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_match_count")]
    pub matches: Option<u32>,
}

// -- counts may arrive as `3.0` from producers that only have one number type
fn deserialize_match_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 => Ok(Some(v as u32)),
        Some(v) => Err(D::Error::custom(format!("invalid match count {}", v))),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SMatrixRow {
    pub leader: SLeader,
    pub opponents: Vec<SOpponentResult>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SMatrixPayload {
    pub data: Vec<SMatrixRow>,
}

impl SSeriesItem {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: String::from(name),
            value,
        }
    }
}

impl SLeader {
    pub fn new(name: &str, art: &str) -> Self {
        Self {
            name: String::from(name),
            art: String::from(art),
        }
    }
}

impl SOpponentResult {
    pub fn new(name: &str, winrate: f64, matches: u32) -> Self {
        Self {
            name: String::from(name),
            winrate: Some(winrate),
            matches: Some(matches),
        }
    }

    pub fn unplayed(name: &str) -> Self {
        Self {
            name: String::from(name),
            winrate: None,
            matches: None,
        }
    }
}

/// Decodes a fetched response body into one of the payload records.
pub fn parse_payload<T: DeserializeOwned>(body: &str) -> WidgetResult<T> {
    serde_json::from_str(body).map_err(|e| EWidgetError::Schema(e.to_string()))
}
