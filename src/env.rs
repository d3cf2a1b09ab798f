//! Environment sources
//!
//! Layers never touch `std::env` directly. They read through an
//! [`EnvSource`], so tests and the CLI can substitute deterministic values.

use std::collections::BTreeMap;

/// Read-only key-value lookup consulted during reload
pub trait EnvSource {
    /// Raw value of `name`, if any
    fn get(&self, name: &str) -> Option<String>;

    /// Value of `name`, treating an empty string as unset
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// The process environment
///
/// Values that are not valid unicode count as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment from key-value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a variable, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Two sources stacked: `front` wins, `back` fills the gaps
///
/// A name present in `front` hides `back`, even when its value is empty, so
/// an empty override reads as unset.
#[derive(Debug, Clone, Default)]
pub struct OverlayEnv<F, B> {
    front: F,
    back: B,
}

impl<F: EnvSource, B: EnvSource> OverlayEnv<F, B> {
    pub fn new(front: F, back: B) -> Self {
        Self { front, back }
    }
}

impl<F: EnvSource, B: EnvSource> EnvSource for OverlayEnv<F, B> {
    fn get(&self, name: &str) -> Option<String> {
        self.front.get(name).or_else(|| self.back.get(name))
    }
}
