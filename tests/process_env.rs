//! Reload from the real process environment
//!
//! Kept in its own test binary: it writes `DB_PORT`, and no other test in
//! this process reads it.

use confchain::config::{BaseConfig, DatabaseConfig, DatabaseSettings, Layer, LayerState};

#[test]
fn test_reload_reads_process_environment() {
    std::env::set_var("DB_PORT", "4242");

    let base = BaseConfig::new("http://webapp", "8080");
    let mut db = DatabaseConfig::new(base, "http://mongodb", "27017");
    db.reload().unwrap();

    assert_eq!(db.db_port(), "4242");
    assert_eq!(db.state(), LayerState::Loaded);
    assert_eq!(db.delegate().state(), LayerState::Loaded);

    std::env::remove_var("DB_PORT");
}
