use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::scenarios::{Case, CaseReport, Summary};

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a run's case reports followed by a summary line
pub fn output_reports(
    output_format: &OutputFormat,
    started_at: DateTime<Utc>,
    reports: &[CaseReport],
) -> anyhow::Result<Summary> {
    let summary = Summary::from_reports(reports);

    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "success": summary.is_success(),
                    "started_at": started_at,
                    "summary": summary,
                    "cases": reports,
                }))?
            );
        }
        OutputFormat::Text => {
            for report in reports {
                println!(
                    "{} [{}] {} ({} ms)",
                    report.outcome.symbol(),
                    report.scenario,
                    report.case,
                    report.elapsed_ms
                );
                if !report.outcome.is_passed() {
                    println!("    {}", report.outcome.detail());
                }
            }
            println!(
                "\n{} passed, {} skipped, {} failed",
                summary.passed, summary.skipped, summary.failed
            );
        }
    }
    Ok(summary)
}

/// Output case labels grouped by scenario
pub fn output_cases(output_format: &OutputFormat, cases: &[Case]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let listed: Vec<Value> = cases
                .iter()
                .map(|case| json!({ "scenario": case.kind(), "case": case.to_string() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "cases": listed }))?);
        }
        OutputFormat::Text => {
            let mut current = None;
            for case in cases {
                if current != Some(case.kind()) {
                    current = Some(case.kind());
                    println!("{}:", case.kind());
                }
                println!("  {}", case);
            }
        }
    }
    Ok(())
}
