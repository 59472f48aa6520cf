//! Response validation: required-key checks and extraction of coordinates,
//! place metadata and error envelopes from raw JSON.
//!
//! Extractors distinguish "no data" (`Ok(None)` / empty list) from a response
//! whose shape does not match the documented contract (`Err(ShapeError)`).

pub mod envelope;
pub mod geocoder;
pub mod search;

pub use envelope::{check_forbidden, ErrorEnvelope};
pub use geocoder::{first_geo_object, parse_pos, GeoObject};
pub use search::{first_search_coordinates, place_names, search_features, PlaceInfo, UNKNOWN};

use serde_json::Value;
use thiserror::Error;

/// Maximum per-axis difference for two services to count as agreeing
pub const COORDINATE_TOLERANCE: f64 = 0.0001;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("missing key '{0}'")]
    MissingKey(String),

    #[error("unexpected value at '{path}': {detail}")]
    InvalidValue { path: String, detail: String },
}

impl ShapeError {
    pub fn invalid(path: impl Into<String>, detail: impl Into<String>) -> Self {
        ShapeError::InvalidValue {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

/// Walk `keys` from `value`, naming the first absent key by its dotted path
pub(crate) fn require<'a>(value: &'a Value, keys: &[&str]) -> Result<&'a Value, ShapeError> {
    let mut current = value;
    let mut path = String::new();
    for key in keys {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);
        current = current
            .get(*key)
            .ok_or_else(|| ShapeError::MissingKey(path.clone()))?;
    }
    Ok(current)
}

pub(crate) fn require_array<'a>(value: &'a Value, keys: &[&str]) -> Result<&'a Vec<Value>, ShapeError> {
    require(value, keys)?
        .as_array()
        .ok_or_else(|| ShapeError::invalid(keys.join("."), "expected an array"))
}
