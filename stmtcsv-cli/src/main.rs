use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use stmtcsv_ingest::{Statement, convert_file};
use std::path::{Path, PathBuf};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

mod config;
mod preview_cmd;
mod state;
mod time;

use config::{Config, load_config};
use preview_cmd::{PreviewFormat, print_preview};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("STMTCSV_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "stmtcsv", version = VERSION, about = "Convert bank statement text into CSV")]
struct Cli {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: ~/.stmtcsv/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from a statement text file and write a CSV
    Convert {
        /// Statement text file
        #[arg(default_value = "paste.txt")]
        input: PathBuf,

        /// Output directory (default: config output.dir, else ".")
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Date used as "today" when naming needs the current year (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Show what would be extracted without writing anything
    Preview {
        /// Statement text file
        input: PathBuf,

        #[arg(short, long, value_enum, default_value = "text")]
        format: PreviewFormat,

        /// Limit number of records printed
        #[arg(long)]
        limit: Option<usize>,

        /// Date used as "today" when naming needs the current year (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_override = cli.config.as_deref();

    match cli.command {
        Command::Convert {
            input,
            output_dir,
            today,
        } => {
            let cfg = load_config(config_override)?;
            ensure_input(&input)?;

            let output_dir = output_dir.unwrap_or_else(|| cfg.output.dir.clone());
            let today = resolve_today(today, &cfg)?;
            debug!(%today, output_dir = %output_dir.display(), "converting {}", input.display());

            let path = convert_file(&input, &output_dir, today)
                .with_context(|| format!("converting {}", input.display()))?;
            println!("Transactions saved to {}", path.display());
        }

        Command::Preview {
            input,
            format,
            limit,
            today,
        } => {
            let cfg = load_config(config_override)?;
            ensure_input(&input)?;

            let text = state::read_statement_text(&input)?;
            let statement = Statement::from_text(&text, resolve_today(today, &cfg)?)
                .with_context(|| format!("parsing {}", input.display()))?;
            print_preview(&statement, format, limit)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init { force } => config::init_config(config_override, force)?,
            ConfigCommand::Show => config::show_config(config_override)?,
            ConfigCommand::Path => {
                println!("{}", config::config_path(config_override)?.display());
            }
        },
    }

    Ok(())
}

fn ensure_input(input: &Path) -> Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }
    Ok(())
}

fn resolve_today(explicit: Option<NaiveDate>, cfg: &Config) -> Result<NaiveDate> {
    match explicit {
        Some(d) => Ok(d),
        None => time::today_in(cfg.calendar.timezone.as_deref()),
    }
}
