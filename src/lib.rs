pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod scenarios;
pub mod types;

pub use client::{ApiRequest, ApiResponse, GeoClient, Service};
pub use config::{ApiKey, ProbeConfig};
pub use error::{ProbeError, ProbeResult};
pub use scenarios::{CaseReport, Outcome, ScenarioKind};
pub use types::{Coordinates, Span};
