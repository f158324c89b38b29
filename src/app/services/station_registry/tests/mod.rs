//! Shared test utilities and fixtures for station registry tests

use std::io::Write;
use tempfile::NamedTempFile;


/// Registry header row matching the fixed column convention
pub const TEST_HEADER: &str = "番号\t地点 記号\t掲載場所\t緯度\t経度\n";

/// Write a registry fixture file with the standard header
pub fn create_registry_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(TEST_HEADER.as_bytes()).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}
