//! End-to-end scenarios against the geocoder and place-search services.
//!
//! Each scenario is a straight-line sequence of requests that stops early when
//! a stage has nothing to work with. Every scenario function returns
//! `Ok(Outcome)` for pass/skip/fail and `Err` only for transport failures.

pub mod cases;
pub mod consistency;
pub mod credentials;
pub mod landmark;
pub mod metro;

pub use cases::{all_cases, Case};

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::client::GeoClient;
use crate::error::{ProbeError, ProbeResult};
use crate::extract::ShapeError;

/// Per-case verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum Outcome {
    Passed(String),
    Skipped(String),
    Failed(String),
}

impl Outcome {
    pub fn passed(detail: impl Into<String>) -> Self {
        Outcome::Passed(detail.into())
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Outcome::Skipped(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Outcome::Failed(reason.into())
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn detail(&self) -> &str {
        match self {
            Outcome::Passed(d) | Outcome::Skipped(d) | Outcome::Failed(d) => d,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Outcome::Passed(_) => "✓",
            Outcome::Skipped(_) => "-",
            Outcome::Failed(_) => "✗",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Valid and invalid API keys against both services
    Credentials,
    /// Geocoder and place-search agree on coordinates
    Consistency,
    /// Pharmacies near a geocoded landmark
    Pharmacies,
    /// Places of a given type near the metro station closest to an address
    MetroPlaces,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Credentials,
        ScenarioKind::Consistency,
        ScenarioKind::Pharmacies,
        ScenarioKind::MetroPlaces,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Credentials => "credentials",
            ScenarioKind::Consistency => "consistency",
            ScenarioKind::Pharmacies => "pharmacies",
            ScenarioKind::MetroPlaces => "metro-places",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub scenario: ScenarioKind,
    pub case: String,
    pub outcome: Outcome,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_reports(reports: &[CaseReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            match report.outcome {
                Outcome::Passed(_) => summary.passed += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
            summary
        })
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Why a scenario stopped before its final assertion
#[derive(Debug)]
pub(crate) enum Halt {
    /// Upstream returned nothing usable for this input
    NoData(String),
    /// Upstream response did not match the documented shape
    Contract(String),
    Transport(ProbeError),
}

impl Halt {
    /// Prefix a contract message with what was being processed
    pub(crate) fn within(self, context: impl fmt::Display) -> Self {
        match self {
            Halt::Contract(msg) => Halt::Contract(format!("Error processing {}: {}", context, msg)),
            other => other,
        }
    }

    /// Fold into an outcome: no data skips, contract violations skip unless strict
    pub(crate) fn resolve(self, strict: bool) -> ProbeResult<Outcome> {
        match self {
            Halt::NoData(reason) => {
                tracing::info!("{}", reason);
                Ok(Outcome::Skipped(reason))
            }
            Halt::Contract(reason) if strict => Ok(Outcome::Failed(reason)),
            Halt::Contract(reason) => {
                tracing::warn!("{}", reason);
                Ok(Outcome::Skipped(reason))
            }
            Halt::Transport(err) => Err(err),
        }
    }
}

impl From<ProbeError> for Halt {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Transport(_) | ProbeError::InvalidUrl(_) => Halt::Transport(err),
            other => Halt::Contract(other.to_string()),
        }
    }
}

impl From<ShapeError> for Halt {
    fn from(err: ShapeError) -> Self {
        Halt::Contract(err.to_string())
    }
}

pub(crate) fn finish(result: Result<Outcome, Halt>, strict: bool) -> ProbeResult<Outcome> {
    match result {
        Ok(outcome) => Ok(outcome),
        Err(halt) => halt.resolve(strict),
    }
}

/// Run a single case, timing it. Transport errors are reported as failures here.
pub async fn run_case(client: &GeoClient, case: &Case) -> CaseReport {
    let started = Instant::now();
    let result = match case {
        Case::Credentials { service, address } => credentials::run(client, *service, address).await,
        Case::Consistency { address } => consistency::run(client, address).await,
        Case::Pharmacies { landmark, place_type } => landmark::run(client, landmark, place_type).await,
        Case::MetroPlaces { address, place_type } => metro::run(client, address, place_type).await,
    };

    let outcome = result.unwrap_or_else(|e| Outcome::failed(e.to_string()));
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &outcome {
        Outcome::Failed(reason) => tracing::error!(scenario = %case.kind(), case = %case, "{}", reason),
        other => tracing::info!(scenario = %case.kind(), case = %case, status = other.symbol(), elapsed_ms),
    }

    CaseReport {
        scenario: case.kind(),
        case: case.to_string(),
        outcome,
        elapsed_ms,
    }
}

/// Run independent cases with at most `jobs` in flight; reports keep case order
pub async fn run_cases(client: &GeoClient, cases: Vec<Case>, jobs: usize) -> Vec<CaseReport> {
    let mut reports: Vec<(usize, CaseReport)> = stream::iter(cases.into_iter().enumerate())
        .map(move |(index, case)| async move { (index, run_case(client, &case).await) })
        .buffer_unordered(jobs.max(1))
        .collect()
        .await;

    reports.sort_by_key(|(index, _)| *index);
    reports.into_iter().map(|(_, report)| report).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_always_skips() {
        let outcome = Halt::NoData("nothing".into()).resolve(true).unwrap();
        assert_eq!(outcome, Outcome::skipped("nothing"));
    }

    #[test]
    fn test_contract_violation_fails_only_when_strict() {
        let lenient = Halt::from(ShapeError::MissingKey("features".into())).resolve(false).unwrap();
        assert!(lenient.is_skipped());

        let strict = Halt::from(ShapeError::MissingKey("features".into())).resolve(true).unwrap();
        assert_eq!(strict, Outcome::failed("missing key 'features'"));
    }

    #[test]
    fn test_within_prefixes_contract_messages_only() {
        let halt = Halt::Contract("missing key 'response'".into()).within("Geocoder response for 'x'");
        assert!(matches!(halt, Halt::Contract(ref m) if m == "Error processing Geocoder response for 'x': missing key 'response'"));

        let halt = Halt::NoData("empty".into()).within("ignored");
        assert!(matches!(halt, Halt::NoData(ref m) if m == "empty"));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::skipped("no metro")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "skipped", "detail": "no metro"}));
    }
}
