use thiserror::Error;

/// Domain errors raised by the normalization pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Repair was attempted on a transcript with no utterances
    #[error("transcript {session_id} has no utterances to repair")]
    EmptyTranscript { session_id: String },

    /// A lexicon file could not be read at all
    #[error("lexicon {origin} line {line}: {reason}")]
    Lexicon {
        origin: String,
        line: usize,
        reason: String,
    },

    /// The metadata table has no column holding transcript paths
    #[error("metadata table has no `{column}` column")]
    MissingColumn { column: String },

    /// A custom extractor pattern is unusable
    #[error("invalid extractor pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
