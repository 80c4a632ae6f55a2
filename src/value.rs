use std::sync::Arc;

/// A single stored value.
///
/// Cells are untyped strings shared through an [Arc], so the catalog owns its
/// own copy of every word it keeps and results can hand cells out cheaply.
pub type Cell = Arc<str>;

/// Placeholder stored wherever a row has no value for a column.
pub const NULL: &str = "---";

/// Maps an empty value to [NULL] so no row ever holds an empty cell.
pub fn normalize(value: &str) -> &str {
    if value.is_empty() { NULL } else { value }
}

/// Copies a word into catalog-owned storage.
pub fn cell(value: &str) -> Cell {
    Arc::from(normalize(value))
}

/// Width of a value in code points, used to align columns in saved files.
///
/// Every byte that is not a UTF-8 continuation byte (`10xxxxxx`) counts as one.
pub fn display_width(value: &str) -> usize {
    value.bytes().filter(|b| b & 0xC0 != 0x80).count()
}
