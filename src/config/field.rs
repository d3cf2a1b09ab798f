//! Per-field reload policy
//!
//! Each field a layer owns is bound to one environment variable and one
//! [`FieldPolicy`]. A [`FieldSet`] resolves all of a layer's fields at once so
//! the layer can commit them together or not at all.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::env::EnvSource;
use crate::error::{ConfigError, Result};

/// What happens when a field's variable is unset or empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Substitute this value
    Fallback(String),
    /// Fail the reload
    Required,
}

/// Chain-wide shorthand for assigning field policies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadMode {
    /// Missing values fall back to documented defaults
    #[default]
    DefaultFilling,
    /// Missing values fail the reload
    Strict,
}

impl ReloadMode {
    /// Policy for a field with a strict variant and the given default
    pub fn policy_for(self, default: &str) -> FieldPolicy {
        match self {
            ReloadMode::DefaultFilling => FieldPolicy::Fallback(default.to_string()),
            ReloadMode::Strict => FieldPolicy::Required,
        }
    }
}

/// A field bound to an environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    variable: &'static str,
    default: &'static str,
    strict_capable: bool,
    overridden: bool,
    policy: FieldPolicy,
}

impl Field {
    /// Field that honours [`ReloadMode::Strict`]
    pub fn new(variable: &'static str, default: &'static str) -> Self {
        Self {
            variable,
            default,
            strict_capable: true,
            overridden: false,
            policy: FieldPolicy::Fallback(default.to_string()),
        }
    }

    /// Field that always falls back, whatever the mode
    pub fn default_only(variable: &'static str, default: &'static str) -> Self {
        Self {
            strict_capable: false,
            ..Self::new(variable, default)
        }
    }

    pub fn variable(&self) -> &'static str {
        self.variable
    }

    /// Documented default value
    pub fn default_value(&self) -> &'static str {
        self.default
    }

    pub fn is_strict_capable(&self) -> bool {
        self.strict_capable
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    /// True once the policy was set explicitly
    pub fn is_overridden(&self) -> bool {
        self.overridden
    }

    fn apply_mode(&mut self, mode: ReloadMode) {
        if self.strict_capable && !self.overridden {
            self.policy = mode.policy_for(self.default);
        }
    }

    fn resolve(&self, env: &dyn EnvSource) -> Result<String> {
        if let Some(value) = env.lookup(self.variable) {
            return Ok(value);
        }
        match &self.policy {
            FieldPolicy::Fallback(default) => {
                debug!("{} unset, using default {:?}", self.variable, default);
                Ok(default.clone())
            }
            FieldPolicy::Required => {
                warn!("{} is required but not set", self.variable);
                Err(ConfigError::missing(self.variable))
            }
        }
    }
}

/// The fields owned by one layer, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet<const N: usize> {
    fields: [Field; N],
}

impl<const N: usize> FieldSet<N> {
    pub fn new(fields: [Field; N]) -> Self {
        Self { fields }
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    /// Assign policies from `mode` to every strict-capable field
    ///
    /// Fields whose policy was set with [`FieldSet::set_policy`] keep it.
    pub fn apply_mode(&mut self, mode: ReloadMode) {
        for field in &mut self.fields {
            field.apply_mode(mode);
        }
    }

    /// Override one field's policy
    ///
    /// The override sticks: later calls to [`FieldSet::apply_mode`] leave
    /// this field alone. Returns false when no field is bound to `variable`.
    pub fn set_policy(&mut self, variable: &str, policy: FieldPolicy) -> bool {
        match self.fields.iter_mut().find(|f| f.variable == variable) {
            Some(field) => {
                field.policy = policy;
                field.overridden = true;
                true
            }
            None => {
                warn!("no field bound to {}, policy override ignored", variable);
                false
            }
        }
    }

    /// Read every field, in declaration order
    ///
    /// Every field is attempted. The first missing required field is the
    /// one reported.
    pub fn resolve(&self, env: &dyn EnvSource) -> Result<[String; N]> {
        let mut values: [String; N] = std::array::from_fn(|_| String::new());
        let mut first_error = None;
        for (slot, field) in values.iter_mut().zip(&self.fields) {
            match field.resolve(env) {
                Ok(value) => *slot = value,
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(values),
        }
    }
}
