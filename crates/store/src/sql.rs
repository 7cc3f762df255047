//! Statements for the per-hardware-line tables.
//!
//! SQLite can't bind identifiers, so the table name is interpolated. It is
//! always [`HardwareLine::as_str`], a fixed lower-case ASCII identifier.

use crate::HardwareLine;

pub(crate) fn create_table(hardware: HardwareLine) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (pubtimestamp INTEGER, pubdate TEXT, version TEXT)",
        hardware.as_str()
    )
}

pub(crate) fn select_all(hardware: HardwareLine) -> String {
    format!(
        "SELECT pubtimestamp, pubdate, version FROM {} ORDER BY pubtimestamp DESC, rowid DESC",
        hardware.as_str()
    )
}

/// Binds the table name as a value, so unlike the other statements it is not
/// interpolated.
pub(crate) const SELECT_TABLE: &str = "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?";

pub(crate) fn select_version(hardware: HardwareLine) -> String {
    format!("SELECT 1 FROM {} WHERE version = ? LIMIT 1", hardware.as_str())
}

pub(crate) fn insert(hardware: HardwareLine) -> String {
    format!("INSERT INTO {} (pubtimestamp, pubdate, version) VALUES (?, ?, ?)", hardware.as_str())
}
