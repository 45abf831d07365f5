use std::path::PathBuf;

use anyhow::{Context, Result};

/// Configuration for a featurization run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// LIWC dictionary (.dic) used by the pronoun and time-orientation features
    pub liwc_path: PathBuf,
    /// Word/category/flag polarity lexicon
    pub emolex_path: PathBuf,
    /// Zero-padding width for session ids and utterance indices
    pub id_width: usize,
    /// Metadata table column holding transcript paths
    pub path_column: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            liwc_path: PathBuf::from("lexicons/LIWC2007_English100131.dic"),
            emolex_path: PathBuf::from("lexicons/NRC-Emotion-Lexicon-Wordlevel-v0.92.txt"),
            id_width: 6,
            path_column: "gold_path".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from defaults overridden by `PSYFEAT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("PSYFEAT_LIWC_PATH") {
            config.liwc_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("PSYFEAT_EMOLEX_PATH") {
            config.emolex_path = PathBuf::from(path);
        }
        if let Some(width) = lookup("PSYFEAT_ID_WIDTH") {
            config.id_width = width
                .trim()
                .parse()
                .with_context(|| format!("PSYFEAT_ID_WIDTH is not a number: {:?}", width))?;
        }
        if let Some(column) = lookup("PSYFEAT_PATH_COLUMN") {
            config.path_column = column;
        }

        Ok(config)
    }
}
