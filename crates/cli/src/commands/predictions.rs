//! Prediction CLI commands

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::client::{ApiClient, ClassifyRequest, EcoScoreRequest, QuantityRequest};
use crate::output::{
    color_confidence, color_eco_score, format_timestamp, print_json, OutputFormat,
};

/// Row for eco score breakdown table
#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Component")]
    component: &'static str,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Max")]
    max: &'static str,
}

/// Predict the waste quantity of a zone
pub async fn predict_waste(
    client: &ApiClient,
    request: QuantityRequest,
    format: OutputFormat,
) -> Result<()> {
    let result = client.predict_waste(&request).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!("{}", "Waste Quantity Prediction".bold());
            println!("{}", "=".repeat(40));
            println!("Zone:             {}", result.zone_id.to_string().cyan());
            println!(
                "Predicted waste:  {}",
                format!("{:.2} kg", result.predicted_waste_kg).green().bold()
            );
            println!();
            println!("Predicted at: {}", format_timestamp(&result.timestamp).dimmed());
        }
    }

    Ok(())
}

/// Classify a waste description
pub async fn classify_waste(
    client: &ApiClient,
    request: ClassifyRequest,
    format: OutputFormat,
) -> Result<()> {
    let result = client.classify_waste(&request).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!("{}", "Waste Classification".bold());
            println!("{}", "=".repeat(40));
            println!("Description:  {}", request.description);
            if let Some(category) = &request.category {
                println!("Category:     {}", category);
            }
            println!("Waste type:   {}", result.waste_type.cyan().bold());
            println!("Confidence:   {}", color_confidence(result.confidence));
            println!();
            println!("Classified at: {}", format_timestamp(&result.timestamp).dimmed());
        }
    }

    Ok(())
}

/// Calculate a user's eco score
pub async fn score_user(
    client: &ApiClient,
    request: EcoScoreRequest,
    format: OutputFormat,
) -> Result<()> {
    let result = client.score_user(&request).await?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!("{}", "Eco Score".bold());
            println!("{}", "=".repeat(40));
            println!("User:       {}", result.user_id.to_string().cyan());
            println!("Eco score:  {}", color_eco_score(result.eco_score));
            println!();

            let b = &result.breakdown;
            let rows = vec![
                BreakdownRow {
                    component: "Activity",
                    score: format!("{:.1}", b.activity_score),
                    max: "40",
                },
                BreakdownRow {
                    component: "Segregation",
                    score: format!("{:.1}", b.segregation_score),
                    max: "30",
                },
                BreakdownRow {
                    component: "Frequency",
                    score: format!("{:.1}", b.frequency_score),
                    max: "20",
                },
                BreakdownRow {
                    component: "Weight",
                    score: format!("{:.1}", b.weight_score),
                    max: "10",
                },
            ];

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!();
            println!("Scored at: {}", format_timestamp(&result.timestamp).dimmed());
        }
    }

    Ok(())
}
