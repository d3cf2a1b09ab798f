//! Chain inspection
//!
//! Walks a chain from the outermost layer down to the base.

use serde::{Deserialize, Serialize};

use super::{Layer, LayerState};

/// Iterator over a chain, outermost first
pub struct Chain<'a> {
    next: Option<&'a dyn Layer>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a dyn Layer;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner();
        Some(current)
    }
}

/// Walk the chain starting at `outermost`
pub fn chain(outermost: &dyn Layer) -> Chain<'_> {
    Chain {
        next: Some(outermost),
    }
}

/// Number of layers in the chain, base included
pub fn depth(outermost: &dyn Layer) -> usize {
    chain(outermost).count()
}

/// One field in a [`LayerSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub variable: String,
    pub value: String,
}

/// Point-in-time view of one layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    pub layer: String,
    pub state: LayerState,
    pub fields: Vec<FieldValue>,
}

/// Capture every layer's own fields, outermost first
pub fn snapshot(outermost: &dyn Layer) -> Vec<LayerSnapshot> {
    chain(outermost)
        .map(|layer| LayerSnapshot {
            layer: layer.name().to_string(),
            state: layer.state(),
            fields: layer
                .own_fields()
                .into_iter()
                .map(|(variable, value)| FieldValue {
                    variable: variable.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseConfig, DatabaseConfig, MotdConfig};
    use crate::env::MapEnv;
    use pretty_assertions::assert_eq;

    fn demo() -> MotdConfig<DatabaseConfig<BaseConfig>> {
        let base = BaseConfig::new("http://webapp", "8080");
        let db = DatabaseConfig::new(base, "http://mongodb", "27017");
        MotdConfig::new(db, "Hello, World!")
    }

    #[test]
    fn test_chain_walks_outermost_first() {
        let motd = demo();
        let names: Vec<_> = chain(&motd).map(|l| l.name()).collect();
        assert_eq!(names, vec!["motd", "database", "base"]);
        assert_eq!(depth(&motd), 3);
        assert_eq!(depth(motd.delegate().delegate()), 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut motd = demo();
        let before = snapshot(&motd);
        assert!(before.iter().all(|s| s.state == LayerState::Unloaded));
        assert_eq!(
            before[2].fields,
            vec![
                FieldValue {
                    variable: "ADDRESS".into(),
                    value: "http://webapp".into()
                },
                FieldValue {
                    variable: "PORT".into(),
                    value: "8080".into()
                },
            ]
        );

        motd.reload_from(&MapEnv::new()).unwrap();
        let after = snapshot(&motd);
        assert!(after.iter().all(|s| s.state == LayerState::Loaded));
        assert_eq!(after[0].fields[0].value, "Have a Nice Day!");
    }

    #[test]
    fn test_snapshot_serializes() {
        let motd = demo();
        let json = serde_json::to_value(snapshot(&motd)).unwrap();
        assert_eq!(json[0]["layer"], "motd");
        assert_eq!(json[0]["state"], "unloaded");
        assert_eq!(json[1]["fields"][1]["variable"], "DB_PORT");
    }
}
