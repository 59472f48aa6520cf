pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProbeConfig;
use crate::scenarios::ScenarioKind;

#[derive(Parser)]
#[command(name = "geoprobe")]
#[command(about = "geoprobe - End-to-end checks for the geocoder and place-search APIs")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Fail instead of skip when a response breaks the documented shape")]
    pub strict: bool,

    #[arg(long, global = true, help = "Number of cases to run concurrently")]
    pub jobs: Option<usize>,

    #[arg(long, global = true, help = "Per-request timeout in seconds")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run scenarios against the live services (all when none given)")]
    Run {
        #[arg(value_enum, help = "Scenarios to run")]
        scenarios: Vec<ScenarioKind>,
    },

    #[command(about = "List the cases each scenario would run")]
    Cases {
        #[arg(value_enum, help = "Scenarios to list")]
        scenarios: Vec<ScenarioKind>,
    },

    #[command(about = "Compare geocoder and place-search coordinates for one address")]
    Check {
        #[arg(help = "Free-text address")]
        address: String,
    },

    #[command(about = "Show the effective configuration")]
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Cli {
    /// Session config with command-line overrides applied on top
    pub fn probe_config(&self, base: &ProbeConfig) -> ProbeConfig {
        let mut config = base.clone();
        if self.strict {
            config.strict = true;
        }
        if let Some(jobs) = self.jobs.filter(|n| *n > 0) {
            config.jobs = jobs;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }
}

fn selected(scenarios: Vec<ScenarioKind>) -> Vec<ScenarioKind> {
    if scenarios.is_empty() {
        ScenarioKind::ALL.to_vec()
    } else {
        scenarios
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = cli.probe_config(crate::config::config());

    match cli.command {
        Commands::Run { scenarios } => commands::run::handle(selected(scenarios), config, output_format).await,
        Commands::Cases { scenarios } => commands::cases::handle(selected(scenarios), output_format),
        Commands::Check { address } => commands::check::handle(address, config, output_format).await,
        Commands::Config => commands::config::handle(&config, output_format),
    }
}
