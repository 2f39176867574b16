//! Ledgerguard Migration CLI Tool
//!
//! Creates the tables described by a schema file in an immudb ledger.
//! `plan` prints the DDL without connecting; `apply` runs it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ledgerguard::{DialectConfig, Dialector};
use ledgerguard_migrate::plan::plan;
use ledgerguard_migrate::schema_file::load_schema;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "ledgerguard-migrate")]
#[command(about = "Schema migration tool for immudb ledgers")]
#[command(version = "0.1.0")]
struct Cli {
    /// Database connection URL (immudb:// or postgresql://)
    #[arg(long, visible_alias = "dsn")]
    database_url: Option<String>,

    /// Configuration file with a [ledger] section
    #[arg(long, default_value = "config/config.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the statements a migration would send, without connecting
    Plan {
        /// Schema file (JSON)
        schema: PathBuf,
    },

    /// Create missing tables, constraints and indexes
    Apply {
        /// Schema file (JSON)
        schema: PathBuf,
    },
}

fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => {
            if !cli.quiet {
                println!("{}", "✅ Success".green());
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "❌ Error:".red(), e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = DialectConfig::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    if let Some(dsn) = cli
        .database_url
        .clone()
        .or_else(|| std::env::var("LEDGERGUARD_DATABASE_URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
    {
        config.dsn = dsn;
    }

    match &cli.command {
        Commands::Plan { schema } => handle_plan(schema, &config, cli.quiet),
        Commands::Apply { schema } => handle_apply(schema, config),
    }
}

fn handle_plan(schema: &Path, config: &DialectConfig, quiet: bool) -> Result<()> {
    let tables = load_schema(schema)?;
    let statements = plan(&tables, config).context("planning migration")?;

    if quiet {
        return Ok(());
    }

    println!("\n📋 Migration plan ({} statements)\n", statements.len());
    for (i, stmt) in statements.iter().enumerate() {
        println!("  {}. {}", i + 1, stmt.sql.cyan());
    }
    println!();
    Ok(())
}

fn handle_apply(schema: &Path, config: DialectConfig) -> Result<()> {
    let tables = load_schema(schema)?;

    let mut dialector = Dialector::new(config);
    dialector.initialize().context("connecting to the ledger")?;

    let migrator = dialector.migrator()?;
    migrator.auto_migrate(&tables).context("applying migration")?;

    for table in migrator.materialized_tables() {
        log::info!("✓ {}", table);
    }
    Ok(())
}
