use chrono::Utc;

use crate::cli::utils::output_reports;
use crate::cli::OutputFormat;
use crate::client::GeoClient;
use crate::config::ProbeConfig;
use crate::scenarios::{all_cases, run_cases, ScenarioKind};

pub async fn handle(
    scenarios: Vec<ScenarioKind>,
    config: ProbeConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let jobs = config.jobs;
    let client = GeoClient::new(config)?;
    let cases: Vec<_> = scenarios.into_iter().flat_map(all_cases).collect();

    tracing::info!(cases = cases.len(), jobs, "running scenarios");
    let started_at = Utc::now();
    let reports = run_cases(&client, cases, jobs).await;

    let summary = output_reports(&output_format, started_at, &reports)?;
    if !summary.is_success() {
        anyhow::bail!("{} case(s) failed", summary.failed);
    }
    Ok(())
}
