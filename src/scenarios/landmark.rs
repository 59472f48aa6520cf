use super::{finish, Halt, Outcome};
use crate::client::{ApiRequest, GeoClient};
use crate::error::ProbeResult;
use crate::extract::{first_geo_object, place_names, search_features};
use crate::types::Span;

pub const LANDMARK_SPAN: Span = Span::square(0.9);
pub const LANDMARK_RESULTS: u32 = 2;

/// Geocode a landmark, then search for `place_type` around it. Sparse data
/// at any stage is not a defect and ends the case as skipped.
pub async fn run(client: &GeoClient, landmark: &str, place_type: &str) -> ProbeResult<Outcome> {
    finish(search_near(client, landmark, place_type).await, client.config().strict)
}

async fn search_near(client: &GeoClient, landmark: &str, place_type: &str) -> Result<Outcome, Halt> {
    let body = client
        .fetch_json(&ApiRequest::geocode(landmark))
        .await
        .map_err(|e| Halt::from(e).within(format!("Geocode API response for landmark '{}'", landmark)))?;
    let object = first_geo_object(&body)
        .map_err(|e| Halt::from(e).within(format!("Geocode API response for landmark '{}'", landmark)))?
        .ok_or_else(|| Halt::NoData(format!("No coordinates found for landmark: {}", landmark)))?;
    let coords = object.coordinates;
    tracing::info!("Coordinates of landmark '{}': {}, {}", landmark, coords.lon, coords.lat);

    let request = ApiRequest::search_biz_near(place_type, coords, LANDMARK_SPAN, LANDMARK_RESULTS);
    let body = client
        .fetch_json(&request)
        .await
        .map_err(|e| Halt::from(e).within(format!("Geosearch API response for landmark '{}'", landmark)))?;

    let features = search_features(&body).map_err(|_| {
        Halt::NoData(format!(
            "'features' key not found in geosearch response for landmark '{}'",
            landmark
        ))
    })?;
    if features.is_empty() {
        return Err(Halt::NoData(format!(
            "No results found in geosearch response for landmark '{}'",
            landmark
        )));
    }

    let names = place_names(features);
    if names.is_empty() {
        return Err(Halt::NoData(format!(
            "No {} results with a name found near landmark '{}'",
            place_type, landmark
        )));
    }

    tracing::info!("Found {} near '{}': {:?}", place_type, landmark, names);
    Ok(Outcome::passed(format!(
        "Found {} near '{}': {}",
        place_type,
        landmark,
        names.join(", ")
    )))
}
