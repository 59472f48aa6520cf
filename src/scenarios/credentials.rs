use super::Outcome;
use crate::client::{ApiRequest, GeoClient, Service};
use crate::error::ProbeResult;
use crate::extract::check_forbidden;

/// Query `address` once with the configured key and once with a derived
/// invalid key. The valid reply must carry the service's top-level marker,
/// the invalid one must be exactly the forbidden envelope.
pub async fn run(client: &GeoClient, service: Service, address: &str) -> ProbeResult<Outcome> {
    let request = ApiRequest::lookup(service, address);
    let key = client.api_key(service).clone();

    tracing::info!("Testing {} API with valid key for address: {}", service, address);
    let response = client.send_with_key(&request, &key).await?;
    tracing::info!(status = response.status, "valid key response");

    let body = match response.json() {
        Ok(body) => body,
        Err(e) => {
            return Ok(Outcome::failed(format!(
                "{} API: Invalid response format received with valid API key for address: {} ({})",
                service, address, e
            )))
        }
    };
    if body.get(service.marker_key()).is_none() {
        return Ok(Outcome::failed(format!(
            "{} API: Failed to get valid response with valid API key for address: {}",
            service, address
        )));
    }

    tracing::info!("Testing {} API with invalid key for address: {}", service, address);
    let response = client.send_with_key(&request, &key.invalid()).await?;
    tracing::info!(status = response.status, "invalid key response");

    let body = match response.json() {
        Ok(body) => body,
        Err(_) => {
            return Ok(Outcome::failed(format!(
                "{} API: Invalid response format received with invalid API key. Response content: {}",
                service, response.body
            )))
        }
    };

    match check_forbidden(&body) {
        Ok(()) => Ok(Outcome::passed(format!(
            "{} API accepts the valid key and rejects the invalid one",
            service
        ))),
        Err(mismatch) => Ok(Outcome::failed(format!("{} for address: {}", mismatch, address))),
    }
}
