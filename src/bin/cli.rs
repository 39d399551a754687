//! Headless prediction client
//!
//! Fills the same form the desktop window shows, submits it once, and prints
//! the rendered outcome.
//!
//! # Usage
//! ```sh
//! cargo run --bin winpredict-cli -- predict --prefill
//! cargo run --bin winpredict-cli -- predict --set kills=12 --set deaths=3
//! cargo run --bin winpredict-cli -- health
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use winpredict::application::bootstrap::Bootstrap;
use winpredict::application::form_controller::{FormController, SubmissionOutcome};
use winpredict::config::Config;
use winpredict::domain::ports::{FormView, Panel, PredictionService};
use winpredict::domain::prediction::{PredictionResponse, format_probability};
use winpredict::interfaces::view_models::form_view_model::FormViewModel;

#[derive(Parser)]
#[command(author, version, about = "Match outcome prediction client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the form and request a prediction
    Predict {
        /// Start from a random sample match
        #[arg(long)]
        prefill: bool,

        /// Seed for the sample (implies --prefill)
        #[arg(long)]
        seed: Option<u64>,

        /// Set a field, e.g. --set kills=12 (applied after the sample)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Print the form and outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a random sample match without submitting it
    Sample {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check the prediction service and list the features it expects
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for --json
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let controller = Bootstrap::init(&config).await?;

    match cli.command {
        Commands::Predict {
            prefill,
            seed,
            fields,
            json,
        } => {
            let mut view = FormViewModel::new(controller.feature_order());

            if prefill || seed.is_some() {
                fill_sample(&controller, &mut view, seed);
            }
            for assignment in &fields {
                apply_assignment(&mut view, assignment)?;
            }

            let Some(outcome) = controller.submit(&mut view).await else {
                anyhow::bail!("A prediction request is already in flight");
            };

            if json {
                print_json(&view, &outcome)?;
            } else {
                print_view(&view, &outcome);
            }

            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Sample { seed } => {
            let mut view = FormViewModel::new(controller.feature_order());
            fill_sample(&controller, &mut view, seed);
            print_fields(&view);
        }
        Commands::Health => {
            let health = controller
                .service()
                .health()
                .await
                .context("Health check failed")?;
            println!("status: {}", health.status);
            println!("features ({}):", health.features.len());
            for feature in &health.features {
                println!("  - {}", feature);
            }
        }
    }

    Ok(())
}

fn fill_sample(controller: &FormController, view: &mut FormViewModel, seed: Option<u64>) {
    let written = match seed {
        Some(seed) => controller.prefill_with(view, &mut StdRng::seed_from_u64(seed)),
        None => controller.prefill(view),
    };
    info!("Sample match written to {} fields", written);
}

fn apply_assignment(view: &mut FormViewModel, assignment: &str) -> Result<()> {
    let (name, value) = assignment
        .split_once('=')
        .with_context(|| format!("Expected NAME=VALUE, got '{}'", assignment))?;
    if !view.set_field(name.trim(), value.trim()) {
        anyhow::bail!(
            "Unknown field '{}'. Known fields: {}",
            name.trim(),
            view.field_names().join(", ")
        );
    }
    Ok(())
}

fn print_fields(view: &FormViewModel) {
    let width = view.fields().iter().map(|f| f.name.len()).max().unwrap_or(0);
    for field in view.fields() {
        println!("{:<width$}  {}", field.name, field.value, width = width);
    }
}

fn print_view(view: &FormViewModel, outcome: &SubmissionOutcome) {
    print_fields(view);
    println!("{}", "=".repeat(60));
    match view.visible_panel() {
        Some(Panel::Result) => {
            println!("Win probability: {}", view.probability_text());
            println!("{}", view.prediction_text());
            if let SubmissionOutcome::Predicted { response, .. } = outcome {
                print_model_details(response);
            }
        }
        Some(Panel::Error) => println!("❌ {}", view.error_text()),
        Some(Panel::Placeholder) | None => println!("No prediction."),
    }
}

fn print_model_details(response: &PredictionResponse) {
    if let Some(threshold) = response.threshold {
        println!("Threshold: {}", format_probability(threshold));
    }
    if let Some(metadata) = &response.metadata {
        if let Some(model) = &metadata.model {
            println!("Model: {}", model);
        }
        for (name, value) in metadata.metric_values() {
            println!("  {}: {:.3}", name, value);
        }
    }
}

fn print_json(view: &FormViewModel, outcome: &SubmissionOutcome) -> Result<()> {
    let request: serde_json::Map<String, serde_json::Value> = view
        .field_entries()
        .into_iter()
        .map(|(name, value)| (name, serde_json::Value::String(value)))
        .collect();

    let result = match outcome {
        SubmissionOutcome::Predicted {
            probability_text,
            outcome: verdict,
            response,
        } => serde_json::json!({
            "ok": true,
            "win_probability": response.win_probability,
            "prediction": response.prediction,
            "probability_text": probability_text,
            "message": verdict.message(),
            "threshold": response.threshold,
            "model": response.metadata.as_ref().and_then(|m| m.model.clone()),
            "metrics": response.metadata.as_ref().and_then(|m| m.metrics.clone()),
        }),
        SubmissionOutcome::Failed { message, .. } => serde_json::json!({
            "ok": false,
            "error": message,
        }),
    };

    let doc = serde_json::json!({ "form": request, "result": result });
    println!(
        "{}",
        serde_json::to_string_pretty(&doc).context("Failed to encode output")?
    );
    Ok(())
}
