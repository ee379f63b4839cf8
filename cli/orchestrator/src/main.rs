//! mimelaunch CLI
//!
//! Opens files with the program recorded for their MIME type, and manages
//! those records.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::ExitCode;

use adapters::{FileCommandSniffer, MimeSniffer, ProcessLauncher, StaticSniffer};
use clap::{Parser, Subcommand};
use config::Settings;
use mimelaunch_cli::{Context, LaunchMode, Result};
use path::ConfigEnv;

/// Command-line interface configuration for mimelaunch.
#[derive(Parser, Debug)]
#[command(
    name = "mimelaunch",
    about = "Open files with the program you chose for their MIME type",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
    /// Log filter (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
}

/// Available mimelaunch commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a file with the default program for its MIME type
    Open {
        /// File to open
        file: PathBuf,
        /// Record PROGRAM as the default for this file's type, then open with it
        #[arg(short = 'd', long = "default", value_name = "PROGRAM")]
        set_default: Option<String>,
        /// Use this MIME type instead of detecting one
        #[arg(long, value_name = "TYPE")]
        mime: Option<String>,
        /// Wait for the program to exit instead of detaching it
        #[arg(long)]
        wait: bool,
        /// Print the program instead of launching it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the default program for a MIME type
    Query {
        /// MIME type, e.g. text/plain
        mime: String,
    },
    /// Set the default program for a MIME type
    Set {
        /// MIME type, e.g. text/plain
        mime: String,
        /// Program to open it with
        program: String,
    },
    /// Remove the default program for a MIME type
    Unset {
        /// MIME type, e.g. text/plain
        mime: String,
    },
    /// List every recorded association
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the detected MIME type of a file
    Detect {
        /// File to inspect
        file: PathBuf,
    },
}

/// Main entry point for the mimelaunch application.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("mimelaunch: {}", err);
            if let Some(hint) = err.hint() {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // `detect` does not touch the config directory, so a missing HOME only
    // matters to the other commands.
    let context = Context::load(&ConfigEnv::from_process());
    let fallback = Settings::default();
    let logging_settings =
        context.as_ref().map_or(&fallback.logging, |context| &context.settings().logging);
    logging::init(
        cli.log_level.as_deref().unwrap_or(logging_settings.level.as_str()),
        logging_settings.file.as_deref(),
    )?;

    match cli.cmd {
        Commands::Open { file, set_default, mime, wait, dry_run } => {
            let context = context?;
            let sniffer: Box<dyn MimeSniffer> = match mime {
                Some(mime_type) => Box::new(StaticSniffer(mime_type)),
                None => Box::new(FileCommandSniffer::new()),
            };
            let mode = context.launch_mode(wait, dry_run);
            let program = context.open(
                &file,
                set_default.as_deref(),
                sniffer.as_ref(),
                &ProcessLauncher::new(),
                mode,
            )?;
            if mode == LaunchMode::DryRun {
                println!("{}", program);
            }
        }
        Commands::Query { mime } => println!("{}", context?.query(&mime)?),
        Commands::Set { mime, program } => println!("{}", context?.set(&mime, &program)?),
        Commands::Unset { mime } => match context?.unset(&mime)? {
            Some(removed) => println!("{}", removed),
            None => eprintln!("mimelaunch: nothing recorded for `{}`", mime),
        },
        Commands::List { json } => {
            let store = context?.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.entries())?);
            } else {
                store.iter().for_each(|association| println!("{}", association));
            }
        }
        Commands::Detect { file } => println!("{}", FileCommandSniffer::new().detect(&file)?),
    }
    Ok(())
}
