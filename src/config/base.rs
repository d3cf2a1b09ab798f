//! Base layer: the application's own address and port

use log::debug;

use super::{Field, FieldPolicy, FieldSet, Layer, LayerState, ReloadMode};
use crate::env::EnvSource;
use crate::error::Result;

pub const ADDRESS: &str = "ADDRESS";
pub const PORT: &str = "PORT";

pub const DEFAULT_ADDRESS: &str = "http://localhost";
pub const DEFAULT_PORT: &str = "8081";

/// Innermost layer of every chain
#[derive(Debug, Clone)]
pub struct BaseConfig {
    address: String,
    port: String,
    fields: FieldSet<2>,
    state: LayerState,
}

impl BaseConfig {
    /// Create an unloaded base layer holding the given values
    pub fn new(address: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: port.into(),
            fields: FieldSet::new([
                Field::new(ADDRESS, DEFAULT_ADDRESS),
                Field::new(PORT, DEFAULT_PORT),
            ]),
            state: LayerState::Unloaded,
        }
    }

    pub fn with_mode(mut self, mode: ReloadMode) -> Self {
        self.fields.apply_mode(mode);
        self
    }

    pub fn with_policy(mut self, variable: &str, policy: FieldPolicy) -> Self {
        self.fields.set_policy(variable, policy);
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> &str {
        &self.port
    }
}

impl Layer for BaseConfig {
    fn name(&self) -> &'static str {
        "base"
    }

    fn reload_from(&mut self, env: &dyn EnvSource) -> Result<()> {
        let [address, port] = self.fields.resolve(env)?;
        self.address = address;
        self.port = port;
        self.state = LayerState::Loaded;
        debug!("base reloaded: address={} port={}", self.address, self.port);
        Ok(())
    }

    fn state(&self) -> LayerState {
        self.state
    }

    fn host(&self) -> &str {
        &self.address
    }

    fn port(&self) -> &str {
        &self.port
    }

    fn own_fields(&self) -> Vec<(&'static str, &str)> {
        vec![(ADDRESS, self.address.as_str()), (PORT, self.port.as_str())]
    }

    fn field_specs(&self) -> &[Field] {
        self.fields.as_slice()
    }

    fn inner(&self) -> Option<&dyn Layer> {
        None
    }

    fn apply_mode(&mut self, mode: ReloadMode) {
        self.fields.apply_mode(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use crate::error::ConfigError;

    #[test]
    fn test_new_is_unloaded_with_construction_values() {
        let base = BaseConfig::new("http://webapp", "8080");
        assert_eq!(base.state(), LayerState::Unloaded);
        assert_eq!(base.address(), "http://webapp");
        assert_eq!(Layer::port(&base), "8080");
        assert!(base.inner().is_none());
    }

    #[test]
    fn test_reload_fills_defaults() {
        let mut base = BaseConfig::new("http://webapp", "8080");
        base.reload_from(&MapEnv::new()).unwrap();
        assert_eq!(base.host(), DEFAULT_ADDRESS);
        assert_eq!(base.port(), DEFAULT_PORT);
        assert_eq!(base.state(), LayerState::Loaded);
    }

    #[test]
    fn test_reload_takes_environment_values() {
        let mut base = BaseConfig::new("http://webapp", "8080");
        let env = MapEnv::from_pairs([(ADDRESS, "http://svc"), (PORT, "9000")]);
        base.reload_from(&env).unwrap();
        assert_eq!(base.address(), "http://svc");
        assert_eq!(base.port(), "9000");
    }

    #[test]
    fn test_strict_failure_leaves_fields_untouched() {
        let mut base = BaseConfig::new("http://webapp", "8080").with_mode(ReloadMode::Strict);
        let env = MapEnv::from_pairs([(ADDRESS, "http://svc")]);

        let err = base.reload_from(&env).unwrap_err();

        assert_eq!(err, ConfigError::missing(PORT));
        assert_eq!(base.address(), "http://webapp");
        assert_eq!(base.port(), "8080");
        assert_eq!(base.state(), LayerState::Unloaded);
    }

    #[test]
    fn test_strict_failure_after_load_keeps_old_values() {
        let mut base = BaseConfig::new("http://webapp", "8080").with_mode(ReloadMode::Strict);
        let env = MapEnv::from_pairs([(ADDRESS, "http://one"), (PORT, "1")]);
        base.reload_from(&env).unwrap();

        let env = MapEnv::from_pairs([(ADDRESS, "http://two")]);
        assert!(base.reload_from(&env).is_err());
        assert_eq!(base.address(), "http://one");
        assert_eq!(base.port(), "1");
        assert_eq!(base.state(), LayerState::Loaded);
    }

    #[test]
    fn test_policy_override_makes_single_field_required() {
        let mut base =
            BaseConfig::new("http://webapp", "8080").with_policy(ADDRESS, FieldPolicy::Required);
        let err = base.reload_from(&MapEnv::from_pairs([(PORT, "1")])).unwrap_err();
        assert_eq!(err.variable(), ADDRESS);
    }

    #[test]
    fn test_field_lookup() {
        let base = BaseConfig::new("http://webapp", "8080");
        assert_eq!(base.field(PORT), Some("8080"));
        assert_eq!(base.field("DB_PORT"), None);
    }
}
