use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::io::write_tsv;
use crate::models::Transcript;

/// Configuration for Stage 3 rendering
#[derive(Debug, Clone)]
pub struct Stage3Config {
    /// Whether the table starts with a header row
    pub include_header: bool,
}

impl Default for Stage3Config {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    /// Path of the written feature table
    pub output_path: PathBuf,
    /// Data rows written (excluding the header)
    pub rows_written: usize,
}

/// Execute Stage 3: write the long feature table for all transcripts
pub fn execute_stage3(
    transcripts: &[Transcript],
    output: &Path,
    config: &Stage3Config,
) -> Result<Stage3Result> {
    info!("Writing feature table to {:?}", output);

    let file =
        File::create(output).with_context(|| format!("Failed to create file: {:?}", output))?;
    let mut writer = BufWriter::new(file);
    let rows_written = write_tsv(&mut writer, transcripts, config.include_header)
        .with_context(|| format!("Failed to write feature table: {:?}", output))?;

    Ok(Stage3Result {
        output_path: output.to_path_buf(),
        rows_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Utterance;

    #[test]
    fn test_stage3_config_default() {
        let config = Stage3Config::default();
        assert!(config.include_header);
    }

    #[test]
    fn test_execute_stage3_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("transcripts.tsv");

        let mut transcript = Transcript::new("000001");
        let mut utterance = Utterance::new("T", 0.0, "hello there");
        utterance.id = Some("000001_000000".to_string());
        utterance.features.insert("absolutist", Some(0.0));
        transcript.utterances.push(utterance);

        let result = execute_stage3(&[transcript], &output, &Stage3Config::default()).unwrap();
        assert_eq!(result.rows_written, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.ends_with("000001\t000001_000000\tT\t0\tabsolutist\t0\thello there\n"));
    }
}
