//! Layered configuration
//!
//! A chain is built bottom-up: a [`BaseConfig`] first, then decorators that
//! each own the chain built so far. Reloading the outermost layer reloads
//! its delegate first, so the base always finishes before any outer layer
//! touches its own fields.
//!
//! - [`BaseConfig`]: `ADDRESS`, `PORT`
//! - [`DatabaseConfig`]: `DB_ADDRESS`, `DB_PORT`
//! - [`MotdConfig`]: `MOTD`

mod base;
mod chain;
mod database;
mod field;
mod motd;

pub use base::{BaseConfig, ADDRESS, DEFAULT_ADDRESS, DEFAULT_PORT, PORT};
pub use chain::{chain, depth, snapshot, Chain, FieldValue, LayerSnapshot};
pub use database::{
    DatabaseConfig, DatabaseSettings, DB_ADDRESS, DB_PORT, DEFAULT_DB_ADDRESS, DEFAULT_DB_PORT,
};
pub use field::{Field, FieldPolicy, FieldSet, ReloadMode};
pub use motd::{MessageOfTheDay, MotdConfig, DEFAULT_MOTD, MOTD};

use serde::{Deserialize, Serialize};

use crate::env::{EnvSource, StdEnv};
use crate::error::Result;

/// Whether a layer has completed a reload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerState {
    /// Fields still hold their construction values
    #[default]
    Unloaded,
    /// At least one reload succeeded
    Loaded,
}

/// One node in a configuration chain
///
/// Implementations reload their delegate before their own fields and leave
/// their own fields untouched when anything fails.
pub trait Layer {
    /// Short name used in logs and snapshots
    fn name(&self) -> &'static str;

    /// Reload this layer and every layer it wraps from `env`
    fn reload_from(&mut self, env: &dyn EnvSource) -> Result<()>;

    /// Reload from the process environment
    fn reload(&mut self) -> Result<()> {
        self.reload_from(&StdEnv)
    }

    fn state(&self) -> LayerState;

    /// Application address, owned by the base layer
    fn host(&self) -> &str;

    /// Application port, owned by the base layer
    fn port(&self) -> &str;

    /// Fields owned by this layer as `(variable, value)` pairs
    fn own_fields(&self) -> Vec<(&'static str, &str)>;

    /// Field bindings owned by this layer
    fn field_specs(&self) -> &[Field];

    /// The wrapped layer, `None` for the base
    fn inner(&self) -> Option<&dyn Layer>;

    /// Assign `mode` to this layer and every layer it wraps
    fn apply_mode(&mut self, mode: ReloadMode);

    /// Look a field up by variable name, here or in any wrapped layer
    fn field(&self, variable: &str) -> Option<&str> {
        self.own_fields()
            .into_iter()
            .find(|(name, _)| *name == variable)
            .map(|(_, value)| value)
            .or_else(|| self.inner().and_then(|inner| inner.field(variable)))
    }
}

impl Layer for Box<dyn Layer> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn reload_from(&mut self, env: &dyn EnvSource) -> Result<()> {
        (**self).reload_from(env)
    }

    fn reload(&mut self) -> Result<()> {
        (**self).reload()
    }

    fn state(&self) -> LayerState {
        (**self).state()
    }

    fn host(&self) -> &str {
        (**self).host()
    }

    fn port(&self) -> &str {
        (**self).port()
    }

    fn own_fields(&self) -> Vec<(&'static str, &str)> {
        (**self).own_fields()
    }

    fn field_specs(&self) -> &[Field] {
        (**self).field_specs()
    }

    fn inner(&self) -> Option<&dyn Layer> {
        (**self).inner()
    }

    fn apply_mode(&mut self, mode: ReloadMode) {
        (**self).apply_mode(mode)
    }

    fn field(&self, variable: &str) -> Option<&str> {
        (**self).field(variable)
    }
}
