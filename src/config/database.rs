//! Database decorator

use log::debug;

use super::{Field, FieldPolicy, FieldSet, Layer, LayerState, MessageOfTheDay, ReloadMode};
use crate::env::EnvSource;
use crate::error::Result;

pub const DB_ADDRESS: &str = "DB_ADDRESS";
pub const DB_PORT: &str = "DB_PORT";

pub const DEFAULT_DB_ADDRESS: &str = "http://localhost";
pub const DEFAULT_DB_PORT: &str = "37017";

/// Read access to database settings anywhere in a chain
pub trait DatabaseSettings {
    fn db_address(&self) -> &str;
    fn db_port(&self) -> &str;
}

/// Adds database address and port on top of any layer
#[derive(Debug, Clone)]
pub struct DatabaseConfig<L> {
    inner: L,
    db_address: String,
    db_port: String,
    fields: FieldSet<2>,
    state: LayerState,
}

impl<L: Layer> DatabaseConfig<L> {
    /// Wrap `inner`, starting with the given database values
    pub fn new(inner: L, db_address: impl Into<String>, db_port: impl Into<String>) -> Self {
        Self {
            inner,
            db_address: db_address.into(),
            db_port: db_port.into(),
            fields: FieldSet::new([
                Field::new(DB_ADDRESS, DEFAULT_DB_ADDRESS),
                Field::new(DB_PORT, DEFAULT_DB_PORT),
            ]),
            state: LayerState::Unloaded,
        }
    }

    /// Set the policy of this layer's own fields
    pub fn with_mode(mut self, mode: ReloadMode) -> Self {
        self.fields.apply_mode(mode);
        self
    }

    pub fn with_policy(mut self, variable: &str, policy: FieldPolicy) -> Self {
        self.fields.set_policy(variable, policy);
        self
    }

    pub fn delegate(&self) -> &L {
        &self.inner
    }

    pub fn delegate_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    pub fn into_delegate(self) -> L {
        self.inner
    }
}

impl<L> DatabaseSettings for DatabaseConfig<L> {
    fn db_address(&self) -> &str {
        &self.db_address
    }

    fn db_port(&self) -> &str {
        &self.db_port
    }
}

impl<L: MessageOfTheDay> MessageOfTheDay for DatabaseConfig<L> {
    fn motd(&self) -> &str {
        self.inner.motd()
    }
}

impl<L: Layer> Layer for DatabaseConfig<L> {
    fn name(&self) -> &'static str {
        "database"
    }

    fn reload_from(&mut self, env: &dyn EnvSource) -> Result<()> {
        self.inner.reload_from(env)?;
        let [db_address, db_port] = self.fields.resolve(env)?;
        self.db_address = db_address;
        self.db_port = db_port;
        self.state = LayerState::Loaded;
        debug!(
            "database reloaded: db_address={} db_port={}",
            self.db_address, self.db_port
        );
        Ok(())
    }

    fn state(&self) -> LayerState {
        self.state
    }

    fn host(&self) -> &str {
        self.inner.host()
    }

    fn port(&self) -> &str {
        self.inner.port()
    }

    fn own_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            (DB_ADDRESS, self.db_address.as_str()),
            (DB_PORT, self.db_port.as_str()),
        ]
    }

    fn field_specs(&self) -> &[Field] {
        self.fields.as_slice()
    }

    fn inner(&self) -> Option<&dyn Layer> {
        Some(&self.inner)
    }

    fn apply_mode(&mut self, mode: ReloadMode) {
        self.inner.apply_mode(mode);
        self.fields.apply_mode(mode);
    }
}
