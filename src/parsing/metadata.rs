use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PipelineError;

/// Default line convention: `P [TIME: 20:15]: I'm sad`
pub const DEFAULT_LINE_PATTERN: &str =
    r"(?P<speaker>\w+)\s\[TIME: (?P<minutes>[0-9]+):(?P<seconds>[0-9]+)\]:(?P<text>.*)";

/// Default file naming convention: `S7_060504_P1_03.02.01_A.TXT`
pub const DEFAULT_PATH_PATTERN: &str = r"S(?P<number>[0-9]+)_(?P<id>[0-9]+)_";

static LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_LINE_PATTERN).expect("valid line pattern"));

static PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_PATH_PATTERN).expect("valid path pattern"));

/// Speaker, start time and raw content pulled from one transcript line
#[derive(Debug, Clone, PartialEq)]
pub struct LineMetadata {
    pub speaker: String,
    /// Start time in minutes
    pub start_time: f64,
    /// Content after the timestamp, not yet normalized (keeps leading separators)
    pub text: String,
}

/// Session identity pulled from a transcript file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetadata {
    /// Zero-padded session id
    pub session_id: String,
    pub session_number: u32,
}

/// Extracts metadata from one raw transcript line
pub trait LineExtractor: Send + Sync {
    /// `None` means the line should be skipped
    fn extract_line(&self, line: &str) -> Option<LineMetadata>;
}

/// Extracts session identity from a transcript path
pub trait PathExtractor: Send + Sync {
    /// `None` means the whole file should be skipped
    fn extract_path(&self, path: &str) -> Option<PathMetadata>;
}

/// Regex-driven line extractor
///
/// The pattern must define the named groups `speaker`, `minutes`,
/// `seconds` and `text`.
#[derive(Debug, Clone)]
pub struct TimestampLineExtractor {
    pattern: Regex,
}

impl Default for TimestampLineExtractor {
    fn default() -> Self {
        Self {
            pattern: LINE_REGEX.clone(),
        }
    }
}

impl TimestampLineExtractor {
    /// Use a different transcript convention
    pub fn with_pattern(pattern: &str) -> Result<Self, PipelineError> {
        let regex = compile_with_groups(pattern, &["speaker", "minutes", "seconds", "text"])?;
        Ok(Self { pattern: regex })
    }
}

impl LineExtractor for TimestampLineExtractor {
    fn extract_line(&self, line: &str) -> Option<LineMetadata> {
        let caps = self.pattern.captures(line)?;
        let minutes: u64 = caps.name("minutes")?.as_str().parse().ok()?;
        let seconds: u64 = caps.name("seconds")?.as_str().parse().ok()?;
        let total_secs = minutes as f64 * 60.0 + seconds as f64;

        Some(LineMetadata {
            speaker: caps.name("speaker")?.as_str().to_string(),
            start_time: total_secs / 60.0,
            text: caps.name("text")?.as_str().to_string(),
        })
    }
}

/// Regex-driven path extractor
///
/// The pattern must define the named groups `number` (session number) and
/// `id` (session id, left-padded with zeros to `id_width`).
#[derive(Debug, Clone)]
pub struct SessionPathExtractor {
    pattern: Regex,
    id_width: usize,
}

impl Default for SessionPathExtractor {
    fn default() -> Self {
        Self::new(6)
    }
}

impl SessionPathExtractor {
    pub fn new(id_width: usize) -> Self {
        Self {
            pattern: PATH_REGEX.clone(),
            id_width,
        }
    }

    /// Use a different file naming convention
    pub fn with_pattern(pattern: &str, id_width: usize) -> Result<Self, PipelineError> {
        let regex = compile_with_groups(pattern, &["number", "id"])?;
        Ok(Self {
            pattern: regex,
            id_width,
        })
    }
}

impl PathExtractor for SessionPathExtractor {
    fn extract_path(&self, path: &str) -> Option<PathMetadata> {
        let caps = self.pattern.captures(path)?;
        let session_number: u32 = caps.name("number")?.as_str().parse().ok()?;
        let raw_id = caps.name("id")?.as_str();

        Some(PathMetadata {
            session_id: format!("{:0>width$}", raw_id, width = self.id_width),
            session_number,
        })
    }
}

/// Extract (speaker, start minutes, content) with the default line convention
pub fn extract_line(line: &str) -> Option<LineMetadata> {
    TimestampLineExtractor::default().extract_line(line)
}

/// Extract (session id, session number) with the default path convention
pub fn extract_path(path: &str, id_width: usize) -> Option<PathMetadata> {
    SessionPathExtractor::new(id_width).extract_path(path)
}

fn compile_with_groups(pattern: &str, groups: &[&str]) -> Result<Regex, PipelineError> {
    let regex = Regex::new(pattern).map_err(|e| PipelineError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let names: Vec<&str> = regex.capture_names().flatten().collect();
    if let Some(missing) = groups.iter().find(|g| !names.contains(*g)) {
        return Err(PipelineError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: format!("missing named group `{}`", missing),
        });
    }

    Ok(regex)
}
