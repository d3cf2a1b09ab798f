//! CLI Module
//!
//! Command-line front end that builds the demonstration chain and reloads it.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::ReloadMode;

/// Layered configuration demo: base, database and message-of-the-day layers
#[derive(Parser, Debug)]
#[command(name = "confchain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the chain before and after a reload
    #[command(name = "show")]
    Show {
        /// What to do when a variable is unset or empty
        #[arg(short, long, value_enum, default_value_t = Mode::Defaults)]
        mode: Mode,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Override an environment variable (repeatable)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Reload in strict mode and report the first missing variable
    #[command(name = "check")]
    Check {
        /// Override an environment variable (repeatable)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// List the environment variables each layer reads
    #[command(name = "vars")]
    Vars,
}

/// Reload policy as spelled on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Fall back to documented defaults
    Defaults,
    /// Fail on the first missing variable
    Strict,
}

impl From<Mode> for ReloadMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Defaults => ReloadMode::DefaultFilling,
            Mode::Strict => ReloadMode::Strict,
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}
