use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::ProbeConfig;

pub fn handle(config: &ProbeConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    if let OutputFormat::Text = output_format {
        println!("Geocoder:     {} (key {})", config.geocoder.base_url, config.geocoder.api_key);
        println!("Place-search: {} (key {})", config.search.base_url, config.search.api_key);
        match config.timeout {
            Some(timeout) => println!("Timeout:      {}s", timeout.as_secs()),
            None => println!("Timeout:      client default"),
        }
        println!("Strict:       {}", config.strict);
        println!("Jobs:         {}", config.jobs);
        return Ok(());
    }

    output_success(
        &output_format,
        "Effective configuration",
        Some(json!({ "config": config })),
    )
}
