//! Smart Waste Management ML service CLI
//!
//! A command-line tool for checking the ML service and requesting waste
//! quantity predictions, waste classifications and user eco scores.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{predictions, status};

/// Smart Waste Management ML service CLI
#[derive(Parser)]
#[command(name = "wastectl")]
#[command(author, version, about = "CLI for the Smart Waste Management ML service", long_about = None)]
pub struct Cli {
    /// ML service URL (can also be set via WASTECTL_API_URL env var)
    #[arg(long, env = "WASTECTL_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the service is up
    Ping,

    /// Show per-artifact health
    Health,

    /// Predict the waste quantity of a zone
    Predict {
        /// Zone ID (1-100)
        #[arg(long)]
        zone_id: i64,

        /// Historical waste in kg
        #[arg(long)]
        historical_waste: f64,

        /// Day of week, 0 = Monday .. 6 = Sunday (defaults to today)
        #[arg(long)]
        day_of_week: Option<i64>,

        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<i64>,
    },

    /// Classify a waste description
    Classify {
        /// Free-text description of the waste
        #[arg(long, short)]
        description: String,

        /// Category hint
        #[arg(long, value_parser = ["PLASTIC", "METAL", "PAPER", "ORGANIC", "E_WASTE"], ignore_case = true)]
        category: Option<String>,
    },

    /// Calculate a user's eco score
    Score {
        /// User ID
        #[arg(long)]
        user_id: i64,

        /// Total requests made
        #[arg(long, default_value_t = 0.0)]
        activity: f64,

        /// Percentage of correctly segregated waste (0-100)
        #[arg(long, default_value_t = 0.0)]
        segregation_accuracy: f64,

        /// Requests per month
        #[arg(long, default_value_t = 0.0)]
        frequency: f64,

        /// Average weight per request in kg
        #[arg(long, default_value_t = 0.0)]
        avg_weight: f64,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let api_url = config::Config::load()?.resolve_api_url(cli.api_url);
    if cli.verbose {
        output::print_info(&format!("Using ML service at {}", api_url));
    }

    // Initialize client
    let client = client::ApiClient::new(&api_url)?;

    // Execute command
    match cli.command {
        Commands::Ping => status::ping(&client, cli.format).await?,
        Commands::Health => status::health(&client, cli.format).await?,
        Commands::Predict {
            zone_id,
            historical_waste,
            day_of_week,
            month,
        } => {
            let request = client::QuantityRequest {
                zone_id,
                historical_waste,
                day_of_week,
                month,
            };
            predictions::predict_waste(&client, request, cli.format).await?;
        }
        Commands::Classify {
            description,
            category,
        } => {
            let request = client::ClassifyRequest {
                description,
                category: category.map(|c| c.to_uppercase()),
            };
            predictions::classify_waste(&client, request, cli.format).await?;
        }
        Commands::Score {
            user_id,
            activity,
            segregation_accuracy,
            frequency,
            avg_weight,
        } => {
            let request = client::EcoScoreRequest {
                user_id,
                user_activity: activity,
                segregation_accuracy,
                request_frequency: frequency,
                avg_weight,
            };
            predictions::score_user(&client, request, cli.format).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
