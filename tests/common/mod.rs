#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use geoprobe::config::{ApiKey, ProbeConfig, ServiceConfig};
use geoprobe::GeoClient;

pub const GEOCODER_KEY: &str = "geo-test-key";
pub const SEARCH_KEY: &str = "search-test-key";

/// Canned upstream reply
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, String),
}

impl Reply {
    pub fn ok(value: Value) -> Self {
        Reply::Json(StatusCode::OK, value)
    }

    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, value) => (status, Json(value)).into_response(),
            Reply::Text(status, body) => (status, body).into_response(),
        }
    }
}

/// Replies for both fake services, keyed on the `geocode` / `text` parameter
#[derive(Debug, Clone)]
pub struct Fixtures {
    geocode: HashMap<String, Reply>,
    search: HashMap<String, Reply>,
    forbidden: Reply,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            geocode: HashMap::new(),
            search: HashMap::new(),
            forbidden: Reply::Json(
                StatusCode::FORBIDDEN,
                json!({"statusCode": 403, "error": "Forbidden", "message": "Invalid api key"}),
            ),
        }
    }
}

impl Fixtures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geocode(mut self, query: &str, reply: Reply) -> Self {
        self.geocode.insert(query.to_string(), reply);
        self
    }

    pub fn search(mut self, text: &str, reply: Reply) -> Self {
        self.search.insert(text.to_string(), reply);
        self
    }

    /// Reply sent for any request carrying the wrong key
    pub fn forbidden(mut self, reply: Reply) -> Self {
        self.forbidden = reply;
        self
    }
}

struct FakeState {
    fixtures: Fixtures,
    requests: Mutex<Vec<(String, HashMap<String, String>)>>,
}

pub struct FakeUpstream {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeUpstream {
    pub async fn start(fixtures: Fixtures) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let state = Arc::new(FakeState {
            fixtures,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/1.x", get(geocode))
            .route("/v1", get(search))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind fake upstream")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
        })
    }

    pub fn config(&self, strict: bool) -> ProbeConfig {
        ProbeConfig {
            geocoder: ServiceConfig {
                base_url: format!("{}/1.x", self.base_url),
                api_key: ApiKey::new(GEOCODER_KEY),
            },
            search: ServiceConfig {
                base_url: format!("{}/v1", self.base_url),
                api_key: ApiKey::new(SEARCH_KEY),
            },
            timeout: Some(std::time::Duration::from_secs(5)),
            strict,
            jobs: 1,
        }
    }

    pub fn client(&self) -> Result<GeoClient> {
        Ok(GeoClient::new(self.config(false))?)
    }

    pub fn strict_client(&self) -> Result<GeoClient> {
        Ok(GeoClient::new(self.config(true))?)
    }

    /// Every request seen so far as (path, query parameters)
    pub fn requests(&self) -> Vec<(String, HashMap<String, String>)> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HashMap<String, String>> {
        self.requests()
            .into_iter()
            .filter(|(p, _)| p == path)
            .map(|(_, params)| params)
            .collect()
    }
}

async fn geocode(State(state): State<Arc<FakeState>>, Query(params): Query<HashMap<String, String>>) -> Response {
    respond(&state, "/1.x", GEOCODER_KEY, "geocode", params, || {
        geo_collection(&[])
    })
}

async fn search(State(state): State<Arc<FakeState>>, Query(params): Query<HashMap<String, String>>) -> Response {
    respond(&state, "/v1", SEARCH_KEY, "text", params, || search_collection(vec![]))
}

fn respond(
    state: &FakeState,
    path: &str,
    key: &str,
    lookup: &str,
    params: HashMap<String, String>,
    empty: impl Fn() -> Value,
) -> Response {
    state
        .requests
        .lock()
        .unwrap()
        .push((path.to_string(), params.clone()));

    if params.get("apikey").map(String::as_str) != Some(key) {
        return state.fixtures.forbidden.clone().into_response();
    }

    let table = if path == "/1.x" {
        &state.fixtures.geocode
    } else {
        &state.fixtures.search
    };
    match params.get(lookup).and_then(|q| table.get(q)) {
        Some(reply) => reply.clone().into_response(),
        None => Reply::ok(empty()).into_response(),
    }
}

/// Geocoder body with one featureMember per (name, "lon lat")
pub fn geo_collection(objects: &[(&str, &str)]) -> Value {
    let members: Vec<Value> = objects
        .iter()
        .map(|(name, pos)| json!({"GeoObject": {"name": name, "Point": {"pos": pos}}}))
        .collect();
    json!({
        "response": {
            "GeoObjectCollection": {
                "metaDataProperty": {"GeocoderResponseMetaData": {"found": members.len().to_string()}},
                "featureMember": members
            }
        }
    })
}

pub fn search_collection(features: Vec<Value>) -> Value {
    json!({"type": "FeatureCollection", "properties": {}, "features": features})
}

pub fn toponym(lon: f64, lat: f64) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [lon, lat]},
        "properties": {"name": "toponym"}
    })
}

pub fn business(name: Option<&str>, phone: Option<&str>, url: Option<&str>) -> Value {
    let mut meta = json!({});
    if let Some(phone) = phone {
        meta["Phones"] = json!([{"type": "phone", "formatted": phone}]);
    }
    if let Some(url) = url {
        meta["url"] = json!(url);
    }
    let mut properties = json!({"CompanyMetaData": meta});
    if let Some(name) = name {
        properties["name"] = json!(name);
    }
    json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [30.3, 59.9]},
        "properties": properties
    })
}
