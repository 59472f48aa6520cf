use super::Service;
use crate::types::{Coordinates, Span};

/// A GET request against one of the two services, minus the API key
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub service: Service,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(service: Service) -> Self {
        Self {
            service,
            params: Vec::new(),
        }
    }

    /// Append an auxiliary query option
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Forward geocoding of free text
    pub fn geocode(address: &str) -> Self {
        Self::new(Service::Geocoder)
            .param("geocode", address)
            .param("format", "json")
    }

    /// Reverse geocoding, optionally filtered to one kind of object (e.g. `metro`)
    pub fn reverse_geocode(coords: Coordinates, kind: Option<&str>, results: Option<u32>) -> Self {
        let mut request = Self::new(Service::Geocoder).param("geocode", coords.to_query());
        if let Some(kind) = kind {
            request = request.param("kind", kind);
        }
        if let Some(results) = results {
            request = request.param("results", results);
        }
        request.param("format", "json")
    }

    /// Toponym search used to compare against the geocoder
    pub fn search_geo(text: &str) -> Self {
        Self::new(Service::Search)
            .param("text", text)
            .param("lang", "ru_RU")
            .param("type", "geo")
            .param("results", 1)
    }

    /// Organisation search scoped to a box around `coords`
    pub fn search_biz_near(text: &str, coords: Coordinates, span: Span, results: u32) -> Self {
        Self::new(Service::Search)
            .param("text", text)
            .param("ll", coords.to_query())
            .param("spn", span.to_query())
            .param("lang", "en_US")
            .param("type", "biz")
            .param("results", results)
    }

    /// Free-text lookup in whichever way the service expects it
    pub fn lookup(service: Service, text: &str) -> Self {
        match service {
            Service::Geocoder => Self::geocode(text),
            Service::Search => Self::search_geo(text),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
