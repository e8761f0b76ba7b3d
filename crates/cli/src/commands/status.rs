//! Service status CLI commands

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::ApiClient;
use crate::output::{color_status, print_json, print_success, print_warning, OutputFormat};

/// Row for artifact health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Artifact")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Check that the service is up
pub async fn ping(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result = client.ping().await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            print_success(&format!(
                "{} is {} at {}",
                result.service,
                color_status(&result.status),
                client.base_url()
            ));
            if result.models_loaded {
                println!("Models loaded: {}", "yes".green());
            } else {
                print_warning("No model artifacts are loaded");
            }
        }
    }

    Ok(())
}

/// Show per-artifact health
pub async fn health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let result = client.health().await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!(
                "{} {}",
                "Service health:".bold(),
                color_status(&result.status).bold()
            );
            println!();

            let rows: Vec<ComponentRow> = result
                .components
                .iter()
                .map(|(name, health)| ComponentRow {
                    name: name.clone(),
                    status: color_status(&health.status),
                    message: health.message.clone().unwrap_or_default(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}
