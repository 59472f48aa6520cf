use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_array, ShapeError};
use crate::types::Coordinates;

/// Placeholder for place metadata the service did not return
pub const UNKNOWN: &str = "Unknown";

pub fn search_features(value: &Value) -> Result<&Vec<Value>, ShapeError> {
    require_array(value, &["features"])
}

/// `Ok(None)` when `features` is present but empty
pub fn first_search_coordinates(value: &Value) -> Result<Option<Coordinates>, ShapeError> {
    let Some(first) = search_features(value)?.first() else {
        return Ok(None);
    };

    let raw = first
        .pointer("/geometry/coordinates")
        .ok_or_else(|| ShapeError::MissingKey("features[0].geometry.coordinates".into()))?;
    let (lon, lat) = <(f64, f64)>::deserialize(raw)
        .map_err(|e| ShapeError::invalid("features[0].geometry.coordinates", e.to_string()))?;

    Ok(Some(Coordinates::new(lon, lat)))
}

/// Non-empty `properties.name` values, in result order
pub fn place_names(features: &[Value]) -> Vec<String> {
    features
        .iter()
        .filter_map(|f| non_empty_str(f, "/properties/name"))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceInfo {
    pub name: String,
    pub phone: String,
    pub website: String,
}

impl PlaceInfo {
    pub fn from_feature(feature: &Value) -> Self {
        let field = |pointer: &str| non_empty_str(feature, pointer).unwrap_or(UNKNOWN).to_string();
        Self {
            name: field("/properties/name"),
            phone: field("/properties/CompanyMetaData/Phones/0/formatted"),
            website: field("/properties/CompanyMetaData/url"),
        }
    }

    pub fn has_name(&self) -> bool {
        self.name != UNKNOWN
    }
}

fn non_empty_str<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
