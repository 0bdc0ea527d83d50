//! Kiln CLI - watch-and-compile coordinator
//!
//! Usage: kiln <COMMAND>
//!
//! Commands:
//!   watch    Watch every project and recompile entry files on change
//!   compile  Compile one registered file now
//!   project  Add, list, remove, activate, check and refresh projects
//!   file     Turn building of a file on or off

mod cli;
mod commands;
mod ui;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;

const LOG_ENV: &str = "KILN_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = commands::run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; `KILN_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "kiln=info",
        2 => "kiln=debug",
        _ => "kiln=trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
