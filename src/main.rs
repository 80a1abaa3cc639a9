// src/main.rs

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, Local};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use replenishment_planner::io::synthetic::{self, DemandProfile, StockSnapshot};
use replenishment_planner::io::{demand, products, reporting};
use replenishment_planner::model::product::{ProductCatalog, ProductFilter};
use replenishment_planner::planning::config::PlannerConfig;
use replenishment_planner::planning::engine::ReplenishmentEngine;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Replenishment planner")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Compute order recommendations from a demand CSV
    Plan {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE", default_value = "recommendations.csv")]
        output: PathBuf,
        /// TOML file overriding planner parameters
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Manage the product master list
    Products(ProductsCmd),
    /// Write a synthetic demand CSV
    Sample {
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, default_value_t = 5)]
        skus: usize,
        #[arg(long, default_value_t = 12)]
        weeks: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct ProductsCmd {
    #[command(subcommand)]
    sub: ProductsSub,
}

#[derive(Subcommand)]
enum ProductsSub {
    /// Merge product files in order, later rows winning per SKU
    Merge {
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print products matching the filters as CSV
    List {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Print the distinct vendors instead of products
        #[arg(long, conflicts_with = "categories")]
        vendors: bool,
        /// Print the distinct categories instead of products
        #[arg(long)]
        categories: bool,
    },
    /// Write an empty product file with the expected header
    Template {
        #[arg(long, value_name = "FILE", default_value = "products_template.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Plan { input, output, config } => run_plan(input, output, config),
        Cmd::Products(ProductsCmd { sub }) => run_products(sub),
        Cmd::Sample { output, skus, weeks, seed } => run_sample(output, skus, weeks, seed),
    }
}

fn run_plan(input: PathBuf, output: PathBuf, config: Option<PathBuf>) -> Result<()> {
    // 1. CONFIGURATION
    let config = match config {
        Some(path) => PlannerConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    let engine = ReplenishmentEngine::new(config);
    info!(config = ?engine.config(), "planner configuration");

    // 2. LOAD DEMAND
    let records = demand::load_demand_file(&input)
        .with_context(|| format!("reading demand file {}", input.display()))?;

    // 3. PLAN
    let recommendations = engine.run(&records);

    // 4. EXPORT
    let report = reporting::build_report(&recommendations);
    reporting::write_report_file(&output, &report)
        .with_context(|| format!("writing report {}", output.display()))?;

    // 5. SUMMARY
    println!("Planned {} SKUs -> {}", report.len(), output.display());
    for (risk, count) in reporting::risk_summary(&report) {
        println!("{}: {}", risk, count);
    }
    Ok(())
}

fn run_products(sub: ProductsSub) -> Result<()> {
    match sub {
        ProductsSub::Merge { output, inputs } => {
            let mut catalog = ProductCatalog::new();
            for path in &inputs {
                let rows = products::load_products_file(path)
                    .with_context(|| format!("reading products file {}", path.display()))?;
                let merged = catalog.merge(rows);
                info!(path = %path.display(), merged, total = catalog.len(), "merged products");
            }

            let file = std::fs::File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            products::write_products(file, catalog.iter())?;
            println!("Total products: {}", catalog.len());
            let extra = catalog.extra_columns();
            if !extra.is_empty() {
                println!("Extra columns: {}", extra.join(", "));
            }
        }
        ProductsSub::List { input, query, vendor, category, vendors, categories } => {
            let mut catalog = ProductCatalog::new();
            catalog.merge(
                products::load_products_file(&input)
                    .with_context(|| format!("reading products file {}", input.display()))?,
            );

            if vendors || categories {
                let values = if vendors { catalog.vendors() } else { catalog.categories() };
                for value in values {
                    println!("{value}");
                }
                return Ok(());
            }

            let filter = ProductFilter { query, vendor, category };
            products::write_products(std::io::stdout().lock(), catalog.filter(&filter))?;
        }
        ProductsSub::Template { output } => {
            let file = std::fs::File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            products::write_template(file)?;
            println!("Template written to {}", output.display());
        }
    }
    Ok(())
}

fn run_sample(output: PathBuf, skus: usize, weeks: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Start `weeks` weeks before the current Monday so the history ends this week
    let today = Local::now().date_naive();
    let this_monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let start = this_monday - Duration::weeks(weeks.saturating_sub(1) as i64);

    let sku_names: Vec<String> = (1..=skus).map(|i| format!("SKU-{:03}", i)).collect();
    let records = synthetic::generate_records(
        &sku_names,
        start,
        weeks,
        DemandProfile::Normal { mean: 10.0, std_dev: 3.0 },
        StockSnapshot::default(),
        &mut rng,
    );

    let file = std::fs::File::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    demand::write_demand(file, &records)?;
    println!("Wrote {} demand rows to {}", records.len(), output.display());
    Ok(())
}
