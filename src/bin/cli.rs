//! Launchdash CLI
//!
//! Command-line access to the same computations the dashboard runs:
//! - Inspect the dataset
//! - Print summary tables for a selection
//! - Render chart figures as JSON
//! - Generate a config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use launchdash::chart::{ChartKind, ChartRenderer};
use launchdash::config::{generate_default_config, Config};
use launchdash::dataset::{Dataset, DatasetLoader};
use launchdash::filter::{
    outcome_distribution, scatter_subset, PayloadRange, SiteFilter, SummaryTable,
};

#[derive(Parser)]
#[command(name = "launchdash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query the launch records dataset from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dataset CSV file (default: configured dataset path)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FigureKind {
    Pie,
    Scatter,
}

impl From<FigureKind> for ChartKind {
    fn from(kind: FigureKind) -> Self {
        match kind {
            FigureKind::Pie => ChartKind::Pie,
            FigureKind::Scatter => ChartKind::Scatter,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dataset statistics
    Stats,

    /// List launch sites in dropdown order
    Sites,

    /// Print the pie chart table
    Pie {
        /// Launch site, or ALL
        #[arg(short, long, default_value = "ALL")]
        site: String,
    },

    /// Print the scatter chart table
    Scatter {
        /// Launch site, or ALL
        #[arg(short, long, default_value = "ALL")]
        site: String,
        /// Lower payload bound in kg (default: dataset minimum)
        #[arg(long)]
        low: Option<f64>,
        /// Upper payload bound in kg (default: dataset maximum)
        #[arg(long)]
        high: Option<f64>,
    },

    /// Print a chart figure as JSON
    Figure {
        /// Chart to render
        #[arg(value_enum)]
        kind: FigureKind,
        /// Launch site, or ALL
        #[arg(short, long, default_value = "ALL")]
        site: String,
        /// Lower payload bound in kg (scatter only)
        #[arg(long)]
        low: Option<f64>,
        /// Upper payload bound in kg (scatter only)
        #[arg(long)]
        high: Option<f64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config = Config::load_default().context("Failed to load configuration")?;
    let path = cli.dataset.clone().unwrap_or(config.dataset.path.clone());
    let dataset = DatasetLoader::new()
        .with_columns(config.dataset.columns.clone())
        .load(&path)
        .with_context(|| format!("Failed to load dataset from {:?}", path))?;

    match cli.command {
        Commands::Stats => {
            let stats = dataset.stats();
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dataset: {:?}", path);
                println!();
                println!("Launches:           {}", stats.records);
                println!("Successful:         {}", stats.successes);
                println!(
                    "Payload range:      {:.0} - {:.0} kg",
                    stats.min_payload_kg, stats.max_payload_kg
                );
                println!("Sites:              {}", stats.sites.join(", "));
                println!("Booster categories: {}", stats.booster_categories.join(", "));
            }
        }

        Commands::Sites => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(dataset.sites())?);
            } else {
                for site in dataset.sites() {
                    println!("{}", site);
                }
            }
        }

        Commands::Pie { site } => {
            let table = outcome_distribution(&dataset, &SiteFilter::from(site));
            print_table(&table, cli.format)?;
        }

        Commands::Scatter { site, low, high } => {
            let range = payload_range(&dataset, low, high)?;
            let table = scatter_subset(&dataset, &SiteFilter::from(site), range);
            print_table(&table, cli.format)?;
        }

        Commands::Figure {
            kind,
            site,
            low,
            high,
        } => {
            let site = SiteFilter::from(site);
            let table = match kind {
                FigureKind::Pie => outcome_distribution(&dataset, &site),
                FigureKind::Scatter => {
                    scatter_subset(&dataset, &site, payload_range(&dataset, low, high)?)
                }
            };
            let labels = config.dashboard.labels.clone();
            let figure = ChartRenderer::new(labels).render(kind.into(), &table)?;
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Slider bounds from arguments, falling back to the observed span
fn payload_range(dataset: &Dataset, low: Option<f64>, high: Option<f64>) -> Result<PayloadRange> {
    let range = PayloadRange::with_fallback(low, high, PayloadRange::observed(dataset))?;
    Ok(range)
}

fn print_table(table: &SummaryTable, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    if table.is_empty() {
        println!("No matching launches.");
        return Ok(());
    }

    match table {
        SummaryTable::SiteSuccesses(rows) => {
            println!("{:<20} {}", "Launch Site", "Successes");
            println!("{}", "-".repeat(30));
            for row in rows {
                println!("{:<20} {}", row.site, row.success_count);
            }
        }
        SummaryTable::OutcomeCounts(rows) => {
            println!("{:<10} {}", "Outcome", "Launches");
            println!("{}", "-".repeat(20));
            for row in rows {
                println!("{:<10} {}", row.outcome, row.count);
            }
        }
        SummaryTable::ScatterPoints(rows) => {
            println!(
                "{:>12} {:>6} {:<10} {}",
                "Payload (kg)", "class", "Booster", "Launch Site"
            );
            println!("{}", "-".repeat(50));
            for row in rows {
                println!(
                    "{:>12.1} {:>6} {:<10} {}",
                    row.payload_mass_kg, row.outcome, row.booster_category, row.launch_site
                );
            }
        }
    }

    Ok(())
}
