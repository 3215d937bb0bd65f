//! Mutant dna detector CLI.
//!
//! Classifies NxN nucleotide grids given as one argument per row, records
//! each verdict in the configured store, and reports aggregate stats.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mutant::core::detector::find_runs;
use mutant::core::types::Verdict;
use mutant::core::validate::validate;
use mutant::exit_codes;
use mutant::io::config::{DEFAULT_CONFIG_PATH, MutantConfig, load_config, write_config};
use mutant::io::store::MemoryStore;
use mutant::logging;
use mutant::service::MutantService;

#[derive(Parser)]
#[command(
    name = "mutant",
    version,
    about = "Detect mutant dna in square nucleotide grids"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log store and cache activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a dna grid; exits 0 for mutant, 2 for human, 1 for invalid input.
    Check {
        /// Grid rows, top to bottom (e.g. `ATGCGA CAGTGC ...`).
        rows: Vec<String>,
        /// List every run found.
        #[arg(long)]
        explain: bool,
        /// Classify without reading or writing the verdict store.
        #[arg(long)]
        no_store: bool,
    },
    /// Print human/mutant counts and their ratio as JSON.
    Stats,
    /// Write a default config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Command::Check {
            rows,
            explain,
            no_store,
        } => cmd_check(&cli.config, &rows, explain, no_store),
        Command::Stats => cmd_stats(&cli.config),
        Command::InitConfig { force } => cmd_init_config(&cli.config, force),
    }
}

fn cmd_check(config_path: &Path, rows: &[String], explain: bool, no_store: bool) -> Result<i32> {
    let cfg = load_config(config_path).context("load config")?;
    let service = if no_store {
        MutantService::new(Box::new(MemoryStore::new()), cfg.max_dimension)
    } else {
        MutantService::from_config(&cfg).context("open verdict store")?
    };

    let checked = match service.check(rows) {
        Ok(checked) => checked,
        Err(err) if err.is_client_error() => {
            eprintln!("invalid dna: {}", err);
            return Ok(exit_codes::INVALID);
        }
        Err(err) => return Err(anyhow::Error::new(err).context("check dna")),
    };

    println!("{}", checked.verdict.label());
    if explain {
        let grid = validate(rows).context("revalidate grid")?;
        for run in find_runs(&grid) {
            println!(
                "run: {} row={} col={} symbol={}",
                run.direction.label(),
                run.row,
                run.col,
                run.symbol
            );
        }
    }

    Ok(match checked.verdict {
        Verdict::Mutant => exit_codes::MUTANT,
        Verdict::Human => exit_codes::HUMAN,
    })
}

fn cmd_stats(config_path: &Path) -> Result<i32> {
    let cfg = load_config(config_path).context("load config")?;
    let service = MutantService::from_config(&cfg).context("open verdict store")?;
    let stats = service.stats().context("read stats")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("serialize stats")?
    );
    Ok(exit_codes::OK)
}

fn cmd_init_config(config_path: &Path, force: bool) -> Result<i32> {
    if !force && config_path.exists() {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    write_config(config_path, &MutantConfig::default())
        .with_context(|| format!("write {}", config_path.display()))?;
    Ok(exit_codes::OK)
}
