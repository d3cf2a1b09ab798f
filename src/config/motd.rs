//! Message-of-the-day decorator

use log::debug;

use super::{DatabaseSettings, Field, FieldPolicy, FieldSet, Layer, LayerState, ReloadMode};
use crate::env::EnvSource;
use crate::error::Result;

pub const MOTD: &str = "MOTD";

pub const DEFAULT_MOTD: &str = "Have a Nice Day!";

/// Read access to the message of the day anywhere in a chain
pub trait MessageOfTheDay {
    fn motd(&self) -> &str;
}

/// Adds a message of the day on top of any layer
///
/// `MOTD` has no strict variant: [`ReloadMode::Strict`] leaves it
/// default-filling. Use [`MotdConfig::with_policy`] to require it anyway.
#[derive(Debug, Clone)]
pub struct MotdConfig<L> {
    inner: L,
    motd: String,
    fields: FieldSet<1>,
    state: LayerState,
}

impl<L: Layer> MotdConfig<L> {
    pub fn new(inner: L, motd: impl Into<String>) -> Self {
        Self {
            inner,
            motd: motd.into(),
            fields: FieldSet::new([Field::default_only(MOTD, DEFAULT_MOTD)]),
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

impl<L> MessageOfTheDay for MotdConfig<L> {
    fn motd(&self) -> &str {
        &self.motd
    }
}

impl<L: DatabaseSettings> DatabaseSettings for MotdConfig<L> {
    fn db_address(&self) -> &str {
        self.inner.db_address()
    }

    fn db_port(&self) -> &str {
        self.inner.db_port()
    }
}

impl<L: Layer> Layer for MotdConfig<L> {
    fn name(&self) -> &'static str {
        "motd"
    }

    fn reload_from(&mut self, env: &dyn EnvSource) -> Result<()> {
        self.inner.reload_from(env)?;
        let [motd] = self.fields.resolve(env)?;
        self.motd = motd;
        self.state = LayerState::Loaded;
        debug!("motd reloaded: motd={:?}", self.motd);
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
        vec![(MOTD, self.motd.as_str())]
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseConfig, DatabaseConfig};
    use crate::env::MapEnv;
    use crate::error::ConfigError;

    #[test]
    fn test_strict_mode_keeps_motd_default_filling() {
        let mut motd = MotdConfig::new(BaseConfig::new("http://webapp", "8080"), "Hello, World!");
        motd.apply_mode(ReloadMode::Strict);

        let env = MapEnv::from_pairs([("ADDRESS", "a"), ("PORT", "1")]);
        motd.reload_from(&env).unwrap();
        assert_eq!(motd.motd(), DEFAULT_MOTD);
    }

    #[test]
    fn test_required_override() {
        let mut motd = MotdConfig::new(BaseConfig::new("http://webapp", "8080"), "Hello, World!")
            .with_policy(MOTD, FieldPolicy::Required);

        let err = motd.reload_from(&MapEnv::new()).unwrap_err();
        assert_eq!(err, ConfigError::missing(MOTD));
        assert_eq!(motd.motd(), "Hello, World!");
        assert_eq!(motd.delegate().state(), LayerState::Loaded);
    }

    #[test]
    fn test_forwards_database_settings() {
        let db = DatabaseConfig::new(BaseConfig::new("http://webapp", "8080"), "http://mongodb", "27017");
        let motd = MotdConfig::new(db, "Hello, World!");
        assert_eq!(motd.db_address(), motd.delegate().db_address());
        assert_eq!(motd.db_port(), "27017");
        assert_eq!(motd.host(), "http://webapp");
    }

    #[test]
    fn test_database_forwards_motd_when_outermost() {
        let motd = MotdConfig::new(BaseConfig::new("http://webapp", "8080"), "Hello, World!");
        let db = DatabaseConfig::new(motd, "http://mongodb", "27017");
        assert_eq!(db.motd(), "Hello, World!");
        assert_eq!(db.delegate().name(), "motd");
    }

    #[test]
    fn test_with_mode_strict_leaves_motd_default_filling() {
        let mut motd = MotdConfig::new(BaseConfig::new("http://webapp", "8080"), "Hello, World!")
            .with_mode(ReloadMode::Strict);

        motd.reload_from(&MapEnv::new()).unwrap();
        assert_eq!(motd.motd(), DEFAULT_MOTD);
        assert_eq!(
            motd.field_specs()[0].policy(),
            &FieldPolicy::Fallback(DEFAULT_MOTD.to_string())
        );
    }
}
