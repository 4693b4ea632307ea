//! pgscout CLI - version-aware PostgreSQL diagnostic probes
//! Composition root: wires the bundled catalog to a live connection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use futures::TryStreamExt;
use pgscout_core::application::executor;
use pgscout_core::domain::{PgVersion, ProbeCatalog, Record, ScalarValue};
use pgscout_core::port::ProbeConnection;
use pgscout_infra_postgres::{create_pool, PgProbeConnection};
use tabled::builder::Builder;
use tabled::{Table, Tabled};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/postgres";

#[derive(Parser)]
#[command(name = "pgscout")]
#[command(about = "Run version-aware diagnostic probes against PostgreSQL", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// PostgreSQL connection URL
    #[arg(long, env = "PGSCOUT_DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List bundled probes and their variant versions
    List,

    /// Show the connected server's version and probe coverage
    Status,

    /// Execute probes and print their records
    Run {
        /// Probe names to execute
        probes: Vec<String>,

        /// Execute every bundled probe
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Execute every bundled probe once and report per-probe outcome
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn init_logging() {
    let log_format = std::env::var("PGSCOUT_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

async fn connect(database_url: &str) -> Result<PgProbeConnection> {
    let pool = create_pool(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    Ok(PgProbeConnection::new(pool))
}

fn cmd_list(catalog: &ProbeCatalog) {
    #[derive(Tabled)]
    struct ProbeRow {
        probe: String,
        variants: String,
    }

    let rows: Vec<ProbeRow> = catalog
        .probe_names()
        .map(|name| {
            let variants = catalog
                .variants(name)
                .unwrap_or(&[])
                .iter()
                .map(|(version, _)| version.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            ProbeRow {
                probe: name.to_string(),
                variants,
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}

async fn cmd_status(database_url: &str, catalog: &ProbeCatalog) -> Result<()> {
    let conn = connect(database_url).await?;
    let raw = conn.server_version_num().await?;
    let server = PgVersion::from_version_num(raw);

    let resolvable = catalog
        .probe_names()
        .filter(|probe| catalog.resolve(probe, server).is_some())
        .count();

    println!("{} {} (num {})", "server version:".bold(), server, raw);
    println!(
        "{} {} bundled, {} resolvable on this server",
        "probes:".bold(),
        catalog.len(),
        resolvable
    );
    Ok(())
}

async fn cmd_run(
    database_url: &str,
    catalog: &ProbeCatalog,
    probes: Vec<String>,
    all: bool,
    format: OutputFormat,
) -> Result<()> {
    let names: Vec<String> = if all {
        catalog.probe_names().map(str::to_string).collect()
    } else {
        probes
    };
    if names.is_empty() {
        anyhow::bail!("No probes given (name some, or pass --all)");
    }

    let conn = connect(database_url).await?;
    for name in &names {
        match format {
            OutputFormat::Json => {
                // Stream records as JSON lines without buffering the result
                let mut records = executor::execute(&conn, catalog, name)
                    .await
                    .with_context(|| format!("Probe '{name}' failed"))?;
                while let Some(record) = records
                    .try_next()
                    .await
                    .with_context(|| format!("Probe '{name}' failed"))?
                {
                    println!("{}", serde_json::to_string(&record)?);
                }
            }
            OutputFormat::Table => {
                let records = executor::fetch_all(&conn, catalog, name)
                    .await
                    .with_context(|| format!("Probe '{name}' failed"))?;
                if records.is_empty() {
                    println!("{} {}", name.bold(), "(no rows)".dimmed());
                } else {
                    println!("{}", name.bold());
                    println!("{}", records_table(&records));
                }
            }
        }
    }
    Ok(())
}

async fn cmd_check(database_url: &str, catalog: &ProbeCatalog) -> Result<()> {
    let conn = connect(database_url).await?;
    let mut failed = 0usize;

    for name in catalog.probe_names() {
        match executor::fetch_all(&conn, catalog, name).await {
            Ok(records) => {
                println!("{} {} ({} rows)", "ok".green(), name, records.len());
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "failed".red(), name, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} probe(s) failed");
    }
    Ok(())
}

fn records_table(records: &[Record]) -> Table {
    let mut builder = Builder::default();
    if let Some(first) = records.first() {
        builder.push_record(first.columns());
    }
    for record in records {
        builder.push_record(record.iter().map(|(_, value)| render_scalar(value)));
    }
    builder.build()
}

fn render_scalar(value: &ScalarValue) -> String {
    match value {
        ScalarValue::Null => String::new(),
        ScalarValue::Bool(v) => v.to_string(),
        ScalarValue::Int16(v) => v.to_string(),
        ScalarValue::Int32(v) => v.to_string(),
        ScalarValue::Int64(v) => v.to_string(),
        ScalarValue::Float32(v) => v.to_string(),
        ScalarValue::Float64(v) => v.to_string(),
        ScalarValue::Text(v) => v.clone(),
        ScalarValue::Bytes(v) => format!("<{} bytes>", v.len()),
        ScalarValue::Uuid(v) => v.to_string(),
        ScalarValue::Json(v) => v.to_string(),
        ScalarValue::Date(v) => v.to_string(),
        ScalarValue::Time(v) => v.to_string(),
        ScalarValue::Timestamp(v) => v.to_string(),
        ScalarValue::TimestampTz(v) => v.to_rfc3339(),
        ScalarValue::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_scalar).collect();
            format!("{{{}}}", rendered.join(","))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    // The catalog is loaded once and handed to every command; a defective
    // bundle aborts before any connection is opened.
    let catalog = pgscout_probes::load_catalog().context("Failed to load bundled probe catalog")?;

    match cli.command {
        Commands::List => cmd_list(&catalog),
        Commands::Status => cmd_status(&cli.database_url, &catalog).await?,
        Commands::Run { probes, all, format } => {
            cmd_run(&cli.database_url, &catalog, probes, all, format).await?
        }
        Commands::Check => cmd_check(&cli.database_url, &catalog).await?,
    }

    Ok(())
}
