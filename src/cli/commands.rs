//! CLI Command Implementations
//!
//! Commands write to the supplied writer and read through the supplied
//! environment so they can be exercised without a terminal.

use std::io::Write;

use log::{info, warn};
use serde_json::json;

use crate::config::{
    chain, snapshot, BaseConfig, DatabaseConfig, DatabaseSettings, Layer, MessageOfTheDay,
    MotdConfig, ReloadMode,
};
use crate::env::{EnvSource, MapEnv};

/// Chain type built by [`demo_chain`]
pub type DemoChain = MotdConfig<DatabaseConfig<BaseConfig>>;

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loaded,
    Failed,
}

/// base(`http://webapp`, `8080`) wrapped by database and motd layers
pub fn demo_chain() -> DemoChain {
    let base = BaseConfig::new("http://webapp", "8080");
    let db = DatabaseConfig::new(base, "http://mongodb", "27017");
    MotdConfig::new(db, "Hello, World!")
}

/// Collect `--set` pairs into an environment
pub fn overrides(set: &[(String, String)]) -> MapEnv {
    MapEnv::from_pairs(set.iter().cloned())
}

fn write_values(out: &mut dyn Write, config: &DemoChain) -> std::io::Result<()> {
    writeln!(out, "  Host: {}", config.host())?;
    writeln!(out, "  Port: {}", config.port())?;
    writeln!(out, "  DB Host: {}", config.db_address())?;
    writeln!(out, "  DB Port: {}", config.db_port())?;
    writeln!(out, "  MOTD: {}", config.motd())
}

fn mode_label(mode: ReloadMode) -> &'static str {
    match mode {
        ReloadMode::DefaultFilling => "default-filling",
        ReloadMode::Strict => "strict",
    }
}

/// Print the demo chain, reload it, print it again.
pub fn show(
    mode: ReloadMode,
    as_json: bool,
    env: &dyn EnvSource,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    info!("Reloading demo chain in {} mode", mode_label(mode));

    let mut config = demo_chain();
    config.apply_mode(mode);
    let before = snapshot(&config);
    let result = config.reload_from(env);

    if as_json {
        let body = json!({
            "mode": mode,
            "before": before,
            "after": snapshot(&config),
            "error": result.as_ref().err().map(|e| e.to_string()),
            "error_code": result.as_ref().err().map(|e| e.error_code()),
            "recovery_suggestions": result
                .as_ref()
                .err()
                .map(|e| e.recovery_suggestions())
                .unwrap_or_default(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(match result {
            Ok(()) => Outcome::Loaded,
            Err(_) => Outcome::Failed,
        });
    }

    writeln!(out, "Construction values:")?;
    for layer in &before {
        for field in &layer.fields {
            writeln!(out, "  {}: {}", field.variable, field.value)?;
        }
    }

    match result {
        Ok(()) => {
            writeln!(out, "Reloaded values ({}):", mode_label(mode))?;
            write_values(out, &config)?;
            Ok(Outcome::Loaded)
        }
        Err(err) => {
            warn!("Reload failed: {}", err);
            writeln!(out, "Reload failed: {}", err)?;
            for suggestion in err.recovery_suggestions() {
                writeln!(out, "  - {}", suggestion)?;
            }
            writeln!(out, "Values in effect:")?;
            write_values(out, &config)?;
            Ok(Outcome::Failed)
        }
    }
}

/// Reload the demo chain in strict mode.
pub fn check(env: &dyn EnvSource, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    info!("Checking required variables");

    let mut config = demo_chain();
    config.apply_mode(ReloadMode::Strict);
    match config.reload_from(env) {
        Ok(()) => {
            writeln!(out, "All required variables are set")?;
            Ok(Outcome::Loaded)
        }
        Err(err) => {
            writeln!(out, "{} [{}]", err, err.error_code())?;
            Ok(Outcome::Failed)
        }
    }
}

/// Print the variables read by each layer of the demo chain.
pub fn vars(out: &mut dyn Write) -> anyhow::Result<()> {
    let config = demo_chain();
    writeln!(
        out,
        "{:<12} {:<10} {:<18} {}",
        "VARIABLE", "LAYER", "DEFAULT", "STRICT"
    )?;
    let layers: Vec<_> = chain(&config).collect();
    for layer in layers.into_iter().rev() {
        for field in layer.field_specs() {
            writeln!(
                out,
                "{:<12} {:<10} {:<18} {}",
                field.variable(),
                layer.name(),
                field.default_value(),
                if field.is_strict_capable() { "yes" } else { "no" }
            )?;
        }
    }
    Ok(())
}
