use super::{finish, Halt, Outcome};
use crate::client::{ApiRequest, GeoClient};
use crate::error::ProbeResult;
use crate::extract::{first_geo_object, first_search_coordinates, COORDINATE_TOLERANCE};
use crate::types::Coordinates;

/// Resolve `address` through both services and require the coordinates to agree
pub async fn run(client: &GeoClient, address: &str) -> ProbeResult<Outcome> {
    finish(compare(client, address).await, client.config().strict)
}

async fn compare(client: &GeoClient, address: &str) -> Result<Outcome, Halt> {
    let geocoded = geocoder_coordinates(client, address)
        .await
        .map_err(|h| h.within(format!("Geocode API response for address '{}'", address)))?;
    tracing::info!("Geocode API Coordinates for {}: {}, {}", address, geocoded.lon, geocoded.lat);

    let searched = search_coordinates(client, address)
        .await
        .map_err(|h| h.within(format!("Geosearch API response for address '{}'", address)))?;
    tracing::info!("Geosearch API Coordinates for {}: {}, {}", address, searched.lon, searched.lat);

    if geocoded.agrees_with(&searched, COORDINATE_TOLERANCE) {
        Ok(Outcome::passed(format!(
            "Coordinates match for {}: Geocode API {}, Geosearch API {}",
            address, geocoded, searched
        )))
    } else {
        Ok(Outcome::failed(format!(
            "Coordinates mismatch for {}: Geocode API {}, Geosearch API {}",
            address, geocoded, searched
        )))
    }
}

async fn geocoder_coordinates(client: &GeoClient, address: &str) -> Result<Coordinates, Halt> {
    let body = client.fetch_json(&ApiRequest::geocode(address)).await?;
    match first_geo_object(&body)? {
        Some(object) => Ok(object.coordinates),
        None => Err(Halt::NoData(format!(
            "No coordinates found for address '{}'. Skipping this address.",
            address
        ))),
    }
}

async fn search_coordinates(client: &GeoClient, address: &str) -> Result<Coordinates, Halt> {
    let body = client.fetch_json(&ApiRequest::search_geo(address)).await?;
    first_search_coordinates(&body)?.ok_or_else(|| {
        Halt::NoData(format!(
            "No coordinates found in Geosearch API response for address: {}",
            address
        ))
    })
}
