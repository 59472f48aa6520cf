pub mod request;

pub use request::ApiRequest;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::config::{ApiKey, ProbeConfig};
use crate::error::{ProbeError, ProbeResult};

/// The two upstream services under test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    Geocoder,
    Search,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Geocoder, Service::Search];

    pub fn label(&self) -> &'static str {
        match self {
            Service::Geocoder => "Geocoder",
            Service::Search => "Place-search",
        }
    }

    /// Top-level key every successful response carries
    pub fn marker_key(&self) -> &'static str {
        match self {
            Service::Geocoder => "response",
            Service::Search => "features",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw upstream reply; the body is kept as text so non-JSON replies can be reported
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub service: Service,
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json(&self) -> ProbeResult<Value> {
        serde_json::from_str(&self.body)
            .map_err(|e| ProbeError::invalid_json(self.service, e.to_string()))
    }
}

/// HTTP client bound to one probe configuration
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    config: ProbeConfig,
}

impl GeoClient {
    pub fn new(config: ProbeConfig) -> ProbeResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("geoprobe/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn api_key(&self, service: Service) -> &ApiKey {
        &self.config.service(service).api_key
    }

    /// Full request URL with `apikey` first, every parameter form-encoded
    pub fn url_for(&self, request: &ApiRequest, key: &ApiKey) -> ProbeResult<Url> {
        self.build_url(request, key.as_str())
    }

    /// Same URL with only the masked key in it, for logging
    pub fn redacted_url(&self, request: &ApiRequest, key: &ApiKey) -> ProbeResult<Url> {
        self.build_url(request, &key.masked())
    }

    fn build_url(&self, request: &ApiRequest, apikey: &str) -> ProbeResult<Url> {
        let base = &self.config.service(request.service).base_url;
        let params = std::iter::once(("apikey", apikey))
            .chain(request.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(Url::parse_with_params(base, params)?)
    }

    pub async fn send(&self, request: &ApiRequest) -> ProbeResult<ApiResponse> {
        let key = self.api_key(request.service).clone();
        self.send_with_key(request, &key).await
    }

    pub async fn send_with_key(&self, request: &ApiRequest, key: &ApiKey) -> ProbeResult<ApiResponse> {
        let url = self.url_for(request, key)?;
        let shown = self.redacted_url(request, key)?;
        tracing::debug!(service = %request.service, url = %shown, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(service = %request.service, status, bytes = body.len(), "response");
        tracing::trace!(service = %request.service, body = %body, "response body");

        Ok(ApiResponse {
            service: request.service,
            status,
            body,
        })
    }

    /// Send and decode, treating a non-JSON body as an error
    pub async fn fetch_json(&self, request: &ApiRequest) -> ProbeResult<Value> {
        self.send(request).await?.json()
    }
}
