use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod db;
mod locale;
mod metrics;
mod models;
mod placements;
mod report;

use locale::Locale;

#[derive(Parser)]
#[command(name = "pet-ads-dashboard")]
#[command(about = "Advertising dashboard for businesses listed on the pet services site", long_about = None)]
struct Cli {
    /// Language used for labels, prices and dates
    #[arg(long, global = true, value_enum, env = "DASHBOARD_LOCALE", default_value_t = Locale::En)]
    locale: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a demo business with packages and campaigns
    Seed,
    /// Import campaigns from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print campaign totals for a business
    Summary {
        #[arg(long)]
        business: String,
        #[arg(long)]
        json: bool,
    },
    /// Print performance per placement for a business
    Placements {
        #[arg(long)]
        business: String,
    },
    /// List the advertising packages on offer
    Packages,
    /// Write the full dashboard as markdown
    Report {
        #[arg(long)]
        business: String,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pet_ads_dashboard=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let locale = cli.locale;
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let upserted = db::import_csv(&pool, &csv).await?;
            println!("Upserted {upserted} campaigns from {}.", csv.display());
        }
        Commands::Summary { business, json } => {
            let business = db::fetch_business(&pool, &business).await?;
            let campaigns = db::fetch_campaigns(&pool, business.id).await?;
            let summary = metrics::summarize(&campaigns);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            let messages = locale.messages();
            println!("{}", business.name);
            println!("{}: {}", messages.active_campaigns, summary.active_count);
            println!("{}: {}", messages.impressions, summary.total_impressions);
            println!("{}: {}", messages.clicks, summary.total_clicks);
            println!("{}: {}", messages.ctr, summary.overall_ctr_percent);
        }
        Commands::Placements { business } => {
            let business = db::fetch_business(&pool, &business).await?;
            let stats = db::fetch_placement_stats(&pool, business.id).await?;
            let mut output = String::new();
            report::write_placement_stats(&mut output, &stats, locale);
            print!("{output}");
        }
        Commands::Packages => {
            let packages = db::fetch_packages(&pool).await?;
            let mut output = String::new();
            report::write_packages(&mut output, &packages, locale);
            print!("{output}");
        }
        Commands::Report { business, out } => {
            let business = db::fetch_business(&pool, &business).await?;
            let (campaigns, stats, packages) = db::fetch_dashboard(&pool, business.id).await?;
            info!(
                business = %business.name,
                campaigns = campaigns.len(),
                placements = stats.len(),
                packages = packages.len(),
                "building dashboard"
            );
            let dashboard = report::build_dashboard(
                &business,
                locale,
                Utc::now(),
                &campaigns,
                &stats,
                &packages,
            );
            std::fs::write(&out, dashboard)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard written to {}.", out.display());
        }
    }

    Ok(())
}
