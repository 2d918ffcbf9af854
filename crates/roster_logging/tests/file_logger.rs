use std::fs;

use log::LevelFilter;
use roster_logging::{initialize, roster_debug, roster_info};
use tempfile::TempDir;

#[test]
fn initialize_writes_to_the_given_file_at_the_given_level() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("roster.log");

    initialize(&path, LevelFilter::Info);
    roster_info!("records loaded: {}", 3);
    roster_debug!("below the configured level");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("records loaded: 3"));
    assert!(!content.contains("below the configured level"));
}
