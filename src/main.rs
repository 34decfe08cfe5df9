use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use titidy::cli;
use titidy::config::defaults;

#[derive(Debug, Parser)]
#[command(name = "titidy")]
#[command(about = "House-style formatter for TurboIntegrator scripts")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Tidy scripts and write the results
    Tidy {
        /// Scripts to tidy (`-` reads stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory (default: `output.outdir` from config)
        #[arg(long)]
        outdir: Option<PathBuf>,
        /// Output file name inside the output directory (single input only)
        #[arg(long)]
        outfile: Option<String>,
        /// Print tidied scripts to stdout instead of writing files
        #[arg(long, conflicts_with_all = ["in_place", "outdir", "outfile"])]
        stdout: bool,
        /// Overwrite each input file
        #[arg(long, conflicts_with_all = ["outdir", "outfile"])]
        in_place: bool,
        /// Script part label recorded in the run log (e.g. Prolog, Epilog)
        #[arg(long, default_value = defaults::PART)]
        part: String,
    },
    /// List scripts that are not tidy; exits with status 1 if any are found
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show run statistics
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write an annotated default config to ~/.titidy/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a value, e.g. `titidy config set style.indent "  "`
    Set { key: String, value: String },
    /// Reset ~/.titidy/config.toml to defaults
    Reset,
}

fn main() -> Result<ExitCode> {
    let app = App::parse();

    match app.command {
        Commands::Tidy {
            files,
            outdir,
            outfile,
            stdout,
            in_place,
            part,
        } => {
            let opts = cli::TidyOptions {
                files,
                outdir,
                outfile,
                stdout,
                in_place,
                part,
            };
            cli::run_tidy(&opts)?;
        }
        Commands::Check { files } => {
            if cli::run_check(&files)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Stats { format, days } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt, days)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show()?,
            ConfigAction::Init { force } => cli::run_config_init(force)?,
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value)?,
            ConfigAction::Reset => cli::run_config_reset()?,
        },
    }

    Ok(ExitCode::SUCCESS)
}
