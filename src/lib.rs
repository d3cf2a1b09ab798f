//! confchain - Layered Application Configuration
//!
//! Configuration is split into layers that decorate one another:
//! - Base: application address and port
//! - Database: database address and port, wrapping any layer
//! - Message of the day: a greeting, wrapping any layer
//!
//! Reloading the outermost layer reloads the whole chain from the
//! environment, base first. Each field either falls back to a documented
//! default or fails the reload when its variable is missing.
//!
//! ```
//! use confchain::config::{BaseConfig, DatabaseConfig, DatabaseSettings, Layer, MotdConfig};
//! use confchain::env::MapEnv;
//!
//! let base = BaseConfig::new("http://webapp", "8080");
//! let db = DatabaseConfig::new(base, "http://mongodb", "27017");
//! let mut config = MotdConfig::new(db, "Hello, World!");
//!
//! config.reload_from(&MapEnv::from_pairs([("DB_PORT", "1")])).unwrap();
//! assert_eq!(config.port(), "8081");
//! assert_eq!(config.db_port(), "1");
//! ```

pub mod cli;
pub mod config;
pub mod env;
pub mod error;

pub use config::{Layer, LayerState, ReloadMode};
pub use error::{ConfigError, Result};
