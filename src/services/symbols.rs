//! Instrument list file.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Read a newline-delimited list of symbols; blank lines are ignored.
pub fn load_symbols(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_symbols(&content))
}

pub fn parse_symbols(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
