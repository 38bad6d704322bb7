use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error};

use agroplan::config::Config;
use agroplan::error::Error;
use agroplan::pipeline::{analyze_and_suggest, AnalysisRequest, SoilObservation};
use agroplan::server::{PlannerApiServer, SoilTypesResponse};

/// Crop, irrigation, and cost suggestions for smallholder plots
#[derive(Parser)]
#[command(name = "agroplan")]
#[command(about = "agroplan - Crop, irrigation, and cost suggestions for smallholder plots", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./agroplan.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the planning pipeline and print the result as JSON (default)
    Plan {
        /// Path to a soil photo; only the filename is inspected
        #[arg(long)]
        image: Option<String>,

        /// Manual soil type (loam, sandy, clay, silty); unknown values fall back to loam
        #[arg(long)]
        soil_type: Option<String>,

        /// Soil texture (fine, balanced, coarse)
        #[arg(long)]
        texture: Option<String>,

        /// Soil moisture percentage
        #[arg(long)]
        moisture: Option<f64>,

        /// Soil pH
        #[arg(long)]
        ph: Option<f64>,

        /// Plot area in acres
        #[arg(short = 'a', long)]
        area: Option<f64>,

        /// Daily water budget in L/day
        #[arg(short = 'w', long)]
        water_budget: Option<f64>,

        /// Maximum number of crop recommendations
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
    },
    /// Start the HTTP API server
    Serve {
        /// Port to bind (overrides config)
        #[arg(short = 'p', long)]
        port: Option<u16>,

        /// Host to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
    },
    /// List supported soil types and defaults
    SoilTypes,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("agroplan started with verbosity level: {}", cli.verbose);

    let result = run(cli).await;

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Plan {
            image,
            soil_type,
            texture,
            moisture,
            ph,
            area,
            water_budget,
            top_n,
        }) => {
            let request = build_request(
                image,
                soil_type,
                texture,
                moisture,
                ph,
                area,
                water_budget,
                top_n,
                &config,
            )?;
            run_plan(&request)
        }
        Some(Commands::Serve { port, host }) => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            PlannerApiServer::new(config).start().await
        }
        Some(Commands::SoilTypes) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&SoilTypesResponse::current())?
            );
            Ok(())
        }
        // No subcommand defaults to a plan with config defaults
        None => {
            let request = AnalysisRequest {
                area_acres: Some(config.planner.default_area_acres),
                top_n: Some(config.planner.default_top_n),
                ..Default::default()
            };
            run_plan(&request)
        }
    }
}

/// Assemble and validate the pipeline request from CLI flags.
///
/// Type validation is this wrapper's job: clap rejects non-numeric values,
/// and non-positive area or zero top-N are rejected here before reaching the
/// core. Negative water budgets are passed through untouched.
#[allow(clippy::too_many_arguments)]
fn build_request(
    image: Option<String>,
    soil_type: Option<String>,
    texture: Option<String>,
    moisture: Option<f64>,
    ph: Option<f64>,
    area: Option<f64>,
    water_budget: Option<f64>,
    top_n: Option<usize>,
    config: &Config,
) -> agroplan::error::Result<AnalysisRequest> {
    let area = area.unwrap_or(config.planner.default_area_acres);
    if !area.is_finite() || area <= 0.0 {
        return Err(Error::Validation(format!(
            "area must be a positive number of acres, got {area}"
        )));
    }
    let top_n = top_n.unwrap_or(config.planner.default_top_n);
    if top_n == 0 {
        return Err(Error::Validation("top-n must be at least 1".to_string()));
    }

    Ok(AnalysisRequest {
        soil: SoilObservation {
            image_path: image,
            soil_type,
            texture,
            moisture_pct: moisture,
            ph,
        },
        area_acres: Some(area),
        water_budget,
        top_n: Some(top_n),
    })
}

fn run_plan(request: &AnalysisRequest) -> Result<()> {
    let result = analyze_and_suggest(request);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
