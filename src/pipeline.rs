use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::featurizers::Featurizer;
use crate::io::read_transcript_file;
use crate::models::Transcript;
use crate::parsing::{LineExtractor, PathExtractor};
use crate::stages::{
    execute_stage0, execute_stage1, execute_stage2, Stage0Config, Stage1Config,
};

/// Outcome of processing a batch of transcript files
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Featurized transcripts in input order
    pub transcripts: Vec<Transcript>,
    /// Files whose path did not identify a session
    pub files_skipped: usize,
}

/// Parse, repair and featurize transcripts one at a time
///
/// Featurizers are shared read-only by every transcript the pipeline handles.
pub struct TranscriptPipeline {
    parse: Stage0Config,
    repair: Stage1Config,
    featurizers: Vec<Box<dyn Featurizer>>,
}

impl TranscriptPipeline {
    pub fn new(featurizers: Vec<Box<dyn Featurizer>>) -> Self {
        Self {
            parse: Stage0Config::default(),
            repair: Stage1Config::default(),
            featurizers,
        }
    }

    /// Build a pipeline honoring the configured session id width
    ///
    /// Utterance indices keep their fixed six-digit padding.
    pub fn from_config(config: &PipelineConfig, featurizers: Vec<Box<dyn Featurizer>>) -> Self {
        Self {
            parse: Stage0Config::with_id_width(config.id_width),
            repair: Stage1Config::default(),
            featurizers,
        }
    }

    /// Replace the transcript conventions
    pub fn with_extractors(
        mut self,
        line_extractor: Box<dyn LineExtractor>,
        path_extractor: Box<dyn PathExtractor>,
    ) -> Self {
        self.parse = Stage0Config {
            line_extractor,
            path_extractor,
        };
        self
    }

    /// Feature names in output order
    pub fn feature_names(&self) -> Vec<&str> {
        self.featurizers.iter().map(|f| f.name()).collect()
    }

    /// Run the full pipeline on transcript text
    ///
    /// `Ok(None)` means the path did not identify a session and the
    /// transcript was skipped.
    pub fn process_str(&self, path: &str, content: &str) -> Result<Option<Transcript>, PipelineError> {
        let Some(parsed) = execute_stage0(path, content, &self.parse) else {
            return Ok(None);
        };
        let mut transcript = parsed.transcript;

        execute_stage1(&mut transcript, &self.repair)?;
        let features = execute_stage2(&mut transcript, &self.featurizers);

        debug!(
            "Session {}: {} lines skipped, {} utterances, {} features ({} null)",
            transcript.session_id,
            parsed.lines_skipped,
            transcript.utterances.len(),
            features.features_computed,
            features.null_values
        );

        Ok(Some(transcript))
    }

    /// Run the full pipeline on one transcript file
    pub fn process_file(&self, path: &Path) -> Result<Option<Transcript>> {
        let path_str = path.to_string_lossy();
        if self.parse.path_extractor.extract_path(&path_str).is_none() {
            warn!("Could not extract session id/number from {:?}, skipping", path);
            return Ok(None);
        }

        let content = read_transcript_file(path)?;
        let transcript = self
            .process_str(&path_str, &content)
            .with_context(|| format!("Failed to process transcript {:?}", path))?;
        Ok(transcript)
    }

    /// Process files sequentially; any failure aborts the batch
    pub fn process_batch<I, P>(&self, paths: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut result = BatchResult::default();

        for path in paths {
            let path = path.as_ref();
            match self.process_file(path)? {
                Some(transcript) => {
                    info!(
                        "Processed session {} ({} utterances)",
                        transcript.session_id,
                        transcript.utterances.len()
                    );
                    result.transcripts.push(transcript);
                }
                None => result.files_skipped += 1,
            }
        }

        info!(
            "Batch complete: {} transcripts, {} files skipped",
            result.transcripts.len(),
            result.files_skipped
        );

        Ok(result)
    }
}
