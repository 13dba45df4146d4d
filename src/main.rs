use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use anomaly_dashboard::config::{DashboardConfig, LoggingConfig};
use anomaly_dashboard::dashboard::CardKind;

#[derive(Parser)]
#[command(
    name = "anomaly-dashboard",
    about = "Render-ready anomaly overlays and summaries for click time-series dashboards",
    version,
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a render descriptor from dashboard input JSON
    Render {
        /// Input file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// Pretty-print the descriptor
        #[arg(long)]
        pretty: bool,
    },

    /// Print the summary cards for dashboard input JSON
    Summary {
        /// Input file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: String,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API
    Serve {
        /// Bind address (defaults to the configured one)
        #[arg(long)]
        bind: Option<String>,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::resolve(cli.config.as_deref())?;
    init_tracing(&config.logging);

    let composer = config.composer();

    match cli.command {
        Commands::Render { input, pretty } => {
            tracing::info!(%input, "Rendering dashboard");
            let data = anomaly_dashboard::input::load(&input)?;
            let descriptor = composer.compose(&data);
            let output = if pretty {
                serde_json::to_string_pretty(&descriptor)
            } else {
                serde_json::to_string(&descriptor)
            }
            .context("failed to encode render descriptor")?;
            println!("{}", output);
        }
        Commands::Summary { input, json } => {
            tracing::info!(%input, "Summarizing anomalies");
            let data = anomaly_dashboard::input::load(&input)?;
            let descriptor = composer.compose(&data);
            if json {
                println!("{}", serde_json::to_string_pretty(&descriptor.stats)?);
            } else {
                println!("\n{}", descriptor.title);
                println!("{:<20} | Count", "Card");
                println!("{:-<20}-|-{:-<8}", "", "");
                for card in &descriptor.cards {
                    let marker = match card.kind {
                        CardKind::Total => " ",
                        CardKind::Spikes => "+",
                        CardKind::Drops => "-",
                    };
                    println!("{:<18} {} | {}", card.label, marker, card.value);
                }
                println!(
                    "\n{} points, {} markers",
                    descriptor.series.len(),
                    descriptor.markers.len()
                );
            }
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            tracing::info!(%bind, "Starting anomaly-dashboard API");
            anomaly_dashboard::serve(&bind, composer).await?;
        }
    }

    Ok(())
}
