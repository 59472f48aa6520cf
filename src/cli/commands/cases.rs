use crate::cli::utils::output_cases;
use crate::cli::OutputFormat;
use crate::scenarios::{all_cases, ScenarioKind};

pub fn handle(scenarios: Vec<ScenarioKind>, output_format: OutputFormat) -> anyhow::Result<()> {
    let cases: Vec<_> = scenarios.into_iter().flat_map(all_cases).collect();
    output_cases(&output_format, &cases)
}
