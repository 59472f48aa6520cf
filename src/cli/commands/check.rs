use chrono::Utc;

use crate::cli::utils::output_reports;
use crate::cli::OutputFormat;
use crate::client::GeoClient;
use crate::config::ProbeConfig;
use crate::scenarios::{run_case, Case};

pub async fn handle(address: String, config: ProbeConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = GeoClient::new(config)?;
    let started_at = Utc::now();
    let report = run_case(&client, &Case::Consistency { address }).await;

    let summary = output_reports(&output_format, started_at, std::slice::from_ref(&report))?;
    if !summary.is_success() {
        anyhow::bail!("{}", report.outcome.detail());
    }
    Ok(())
}
