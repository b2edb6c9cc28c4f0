//! deliberate CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use deliberate_core::config::{load_config_from, DeliberateConfig};

mod commands;

#[derive(Parser)]
#[command(name = "deliberate", version, about = "Deliberate practice tracker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Activities file (overrides config)
    #[arg(long, global = true)]
    activities: Option<PathBuf>,

    /// Practices file (overrides config)
    #[arg(long, global = true)]
    practices: Option<PathBuf>,

    /// Without a subcommand, ask which mode to run in
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Practice randomly chosen activities and score them
    Practice,

    /// Summarize recorded practice sets per activity
    Evaluate {
        /// Output format: text, table, json, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List activities in key order
    Activities,

    /// Create a starter config and activities file
    Init,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("deliberate_core=info,deliberate_cli=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Init) => commands::init::execute(),
        command => resolve_config(cli.config, cli.activities, cli.practices).and_then(|config| {
            match command {
                None => commands::interactive::execute(&config),
                Some(Commands::Practice) => commands::practice::execute(&config),
                Some(Commands::Evaluate { format, output }) => {
                    commands::evaluate::execute(&config, &format, output)
                }
                Some(Commands::Activities) => commands::activities::execute(&config),
                Some(Commands::Init) => commands::init::execute(),
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Load the config file, then let explicit flags win.
fn resolve_config(
    config_path: Option<PathBuf>,
    activities: Option<PathBuf>,
    practices: Option<PathBuf>,
) -> Result<DeliberateConfig> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(path) = activities {
        config.activities_file = path;
    }
    if let Some(path) = practices {
        config.practices_file = path;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
