//! confchain CLI
//!
//! Builds the base -> database -> motd chain and reloads it from the
//! process environment.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::info;

use confchain::cli::commands::{self, Outcome};
use confchain::cli::{Cli, Commands};
use confchain::env::{OverlayEnv, StdEnv};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("confchain v{}", env!("CARGO_PKG_VERSION"));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let outcome = match cli.command {
        Some(cmd) => handle_command(cmd, &mut out)?,
        None => {
            writeln!(out, "confchain v{}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "Use --help for available commands")?;
            Outcome::Loaded
        }
    };

    Ok(match outcome {
        Outcome::Loaded => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}

fn handle_command(cmd: Commands, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    match cmd {
        Commands::Show { mode, json, set } => {
            let env = OverlayEnv::new(commands::overrides(&set), StdEnv);
            commands::show(mode.into(), json, &env, out)
        }
        Commands::Check { set } => {
            let env = OverlayEnv::new(commands::overrides(&set), StdEnv);
            commands::check(&env, out)
        }
        Commands::Vars => {
            commands::vars(out)?;
            Ok(Outcome::Loaded)
        }
    }
}
