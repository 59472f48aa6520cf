use serde::Deserialize;
use serde_json::Value;

use super::{require_array, ShapeError};
use crate::types::Coordinates;

const FEATURE_MEMBER: [&str; 3] = ["response", "GeoObjectCollection", "featureMember"];

/// First object of a geocoder result collection
#[derive(Debug, Clone, PartialEq)]
pub struct GeoObject {
    pub name: Option<String>,
    pub coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
struct RawGeoObject {
    name: Option<String>,
    #[serde(rename = "Point")]
    point: RawPoint,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    pos: String,
}

/// Parse the geocoder's `"lon lat"` position string
pub fn parse_pos(pos: &str) -> Result<Coordinates, ShapeError> {
    let parts: Vec<&str> = pos.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(ShapeError::invalid("Point.pos", format!("expected 'lon lat', got '{}'", pos)));
    }

    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| ShapeError::invalid("Point.pos", format!("'{}': {}", s, e)))
    };
    Ok(Coordinates::new(parse(parts[0])?, parse(parts[1])?))
}

/// `Ok(None)` when the collection is present but empty
pub fn first_geo_object(value: &Value) -> Result<Option<GeoObject>, ShapeError> {
    let members = require_array(value, &FEATURE_MEMBER)?;
    let Some(first) = members.first() else {
        return Ok(None);
    };

    let raw = first
        .get("GeoObject")
        .ok_or_else(|| ShapeError::MissingKey("featureMember[0].GeoObject".into()))?;
    let raw = RawGeoObject::deserialize(raw)
        .map_err(|e| ShapeError::invalid("featureMember[0].GeoObject", e.to_string()))?;

    Ok(Some(GeoObject {
        name: raw.name,
        coordinates: parse_pos(&raw.point.pos)?,
    }))
}
