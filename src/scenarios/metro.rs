use serde_json::Value;

use super::{finish, Halt, Outcome};
use crate::client::{ApiRequest, GeoClient};
use crate::error::ProbeResult;
use crate::extract::{first_geo_object, search_features, GeoObject, PlaceInfo, ShapeError, UNKNOWN};
use crate::types::Span;

pub const METRO_KIND: &str = "metro";
pub const METRO_SPAN: Span = Span::square(0.5);
pub const METRO_RESULTS: u32 = 2;

/// Address → nearest metro station → first `place_type` near the station.
/// A stage without data skips the case; a place without a name fails it.
pub async fn run(client: &GeoClient, address: &str, place_type: &str) -> ProbeResult<Outcome> {
    finish(
        place_near_metro(client, address, place_type).await,
        client.config().strict,
    )
}

async fn place_near_metro(client: &GeoClient, address: &str, place_type: &str) -> Result<Outcome, Halt> {
    tracing::info!("Testing address: {}", address);
    let strict = client.config().strict;

    let stage = format!("Geocode API response for address '{}'", address);
    let body = client
        .fetch_json(&ApiRequest::geocode(address))
        .await
        .map_err(|e| Halt::from(e).within(&stage))?;
    let origin = first_object(&body, strict).map_err(|h| h.within(&stage))?.ok_or_else(|| {
        Halt::NoData(format!(
            "No coordinates found for address '{}'. Skipping this address.",
            address
        ))
    })?;
    let coords = origin.coordinates;
    tracing::info!("Coordinates for address '{}': {}, {}", address, coords.lon, coords.lat);

    let request = ApiRequest::reverse_geocode(coords, Some(METRO_KIND), Some(1));
    let stage = format!("metro lookup response for address '{}'", address);
    let body = client
        .fetch_json(&request)
        .await
        .map_err(|e| Halt::from(e).within(&stage))?;
    let metro = first_object(&body, strict).map_err(|h| h.within(&stage))?.ok_or_else(|| {
        Halt::NoData(format!(
            "No metro found near address '{}'. Skipping this address.",
            address
        ))
    })?;
    let metro_name = metro.name.as_deref().unwrap_or(UNKNOWN);
    tracing::info!("Metro found near address '{}': {} at {}", address, metro_name, metro.coordinates);

    let request = ApiRequest::search_biz_near(place_type, metro.coordinates, METRO_SPAN, METRO_RESULTS);
    let stage = format!("Place-search response for '{}' near metro '{}'", place_type, metro_name);
    let body = client
        .fetch_json(&request)
        .await
        .map_err(|e| Halt::from(e).within(&stage))?;
    let first = search_features(&body)
        .ok()
        .and_then(|features| features.first())
        .ok_or_else(|| {
            Halt::NoData(format!(
                "No place type found near metro '{}' for address '{}'.",
                metro_name, address
            ))
        })?;

    let place = PlaceInfo::from_feature(first);
    tracing::info!(
        "Place type found: {}, Phone: {}, Website: {}",
        place.name,
        place.phone,
        place.website
    );

    if !place.has_name() {
        return Ok(Outcome::failed(format!(
            "Place name is not found for address '{}' and place type '{}'",
            address, place_type
        )));
    }
    if place.phone == UNKNOWN {
        tracing::warn!(
            "Place phone number not found for address '{}' and place type '{}'",
            address,
            place_type
        );
    }
    if place.website == UNKNOWN {
        tracing::warn!(
            "Place website not found for address '{}' and place type '{}'",
            address,
            place_type
        );
    }

    Ok(Outcome::passed(format!(
        "{} near metro '{}': phone {}, website {}",
        place.name, metro_name, place.phone, place.website
    )))
}

/// Outside strict mode a missing result collection means "nothing found";
/// a malformed first object is always a contract problem.
fn first_object(body: &Value, strict: bool) -> Result<Option<GeoObject>, Halt> {
    match first_geo_object(body) {
        Ok(object) => Ok(object),
        Err(ShapeError::MissingKey(_)) if !strict => Ok(None),
        Err(e) => Err(e.into()),
    }
}
