use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PipelineError;

/// Read a raw transcript file
pub fn read_transcript_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Read transcript paths from a tab-separated metadata table file
pub fn read_metadata_table(path: &Path, column: &str) -> Result<Vec<String>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_metadata_table(&content, column)
        .with_context(|| format!("Failed to parse metadata table {:?}", path))
}

/// Extract the transcript path column from tab-separated metadata
///
/// The first line is the header. Rows with an empty or missing path cell
/// are skipped.
pub fn parse_metadata_table(content: &str, column: &str) -> Result<Vec<String>> {
    let mut lines = content.lines();
    let header = lines.next().unwrap_or_default();

    let index = header
        .split('\t')
        .position(|name| name.trim() == column)
        .ok_or_else(|| PipelineError::MissingColumn {
            column: column.to_string(),
        })?;

    let paths = lines
        .filter_map(|line| line.split('\t').nth(index))
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect();

    Ok(paths)
}
