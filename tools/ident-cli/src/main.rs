//! `ident`: generate, validate and inspect idents.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ident_cli::{commands, load_config, Requirement};
use tracing_subscriber::EnvFilter;

/// Tamper-evident public identifiers
#[derive(Parser, Debug)]
#[command(name = "ident")]
#[command(about = "Generate, validate and inspect idents")]
struct Args {
    /// Sign key (overrides IDENT_SIGN_KEY)
    #[arg(long, global = true)]
    sign_key: Option<String>,

    /// Verify key (overrides IDENT_VERIFY_KEY)
    #[arg(long, global = true)]
    verify_key: Option<String>,

    /// Snowflake node id, 0-1023 (overrides IDENT_NODE)
    #[arg(long, global = true)]
    node: Option<u16>,

    /// Snowflake epoch in Unix ms (overrides IDENT_EPOCH_MS)
    #[arg(long, global = true)]
    epoch_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print new idents
    Generate {
        /// How many to print
        #[arg(short, long, default_value = "1")]
        count: usize,
    },
    /// Check idents against the configured keys
    Validate {
        /// Idents to check
        #[arg(required = true)]
        idents: Vec<String>,

        /// Keys that must be configured
        #[arg(long, value_enum, default_value_t = Requirement::None)]
        require: Requirement,
    },
    /// Print the decoded fields of an ident as JSON
    Inspect {
        /// Ident to decode
        ident: String,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = load_config()?;
    config.apply_overrides(args.sign_key, args.verify_key, args.node, args.epoch_ms)?;

    let mut stdout = io::stdout().lock();
    match args.command {
        Command::Generate { count } => commands::generate(&config, count, &mut stdout)?,
        Command::Validate { idents, require } => {
            if !commands::validate(&config, &idents, require, &mut stdout)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Inspect { ident } => commands::inspect(&config, &ident, &mut stdout)?,
    }
    Ok(ExitCode::SUCCESS)
}
