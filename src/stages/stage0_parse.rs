use tracing::trace;

use crate::models::{Transcript, Utterance};
use crate::parsing::{
    normalize, LineExtractor, PathExtractor, SessionPathExtractor, TimestampLineExtractor,
};

/// Configuration for Stage 0 parsing
pub struct Stage0Config {
    /// Pulls speaker, start time and content out of each line
    pub line_extractor: Box<dyn LineExtractor>,
    /// Pulls session id and number out of the file path
    pub path_extractor: Box<dyn PathExtractor>,
}

impl Default for Stage0Config {
    fn default() -> Self {
        Self::with_id_width(6)
    }
}

impl Stage0Config {
    /// Default transcript conventions with a custom session id width
    pub fn with_id_width(id_width: usize) -> Self {
        Self {
            line_extractor: Box::new(TimestampLineExtractor::default()),
            path_extractor: Box::new(SessionPathExtractor::new(id_width)),
        }
    }
}

/// Result of Stage 0 parsing
#[derive(Debug)]
pub struct Stage0Result {
    /// Unrepaired transcript, one utterance per parsed line
    pub transcript: Transcript,
    /// Lines that did not match the line convention
    pub lines_skipped: usize,
}

/// Perform Stage 0: turn raw transcript text into utterances
///
/// Returns `None` when the path does not identify a session, in which case
/// the whole file is skipped. Lines that do not match the line convention
/// are dropped. Utterance text is normalized but otherwise untouched.
pub fn execute_stage0(path: &str, content: &str, config: &Stage0Config) -> Option<Stage0Result> {
    let session = config.path_extractor.extract_path(path)?;

    let mut transcript = Transcript::new(session.session_id);
    transcript.session_number = Some(session.session_number);
    transcript.source_path = Some(path.to_string());

    let mut lines_skipped = 0;
    for (line_no, line) in content.lines().enumerate() {
        match config.line_extractor.extract_line(line) {
            Some(meta) => transcript.utterances.push(Utterance::new(
                meta.speaker,
                meta.start_time,
                normalize(&meta.text),
            )),
            None => {
                trace!("{}:{}: line does not match, skipping", path, line_no + 1);
                lines_skipped += 1;
            }
        }
    }

    Some(Stage0Result {
        transcript,
        lines_skipped,
    })
}
