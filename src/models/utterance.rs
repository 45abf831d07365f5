use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature values keyed by feature name, in the order they were computed
///
/// A `None` value means the featurizer could not compute a value for the
/// utterance; it is kept so every (utterance, featurizer) pair has an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap {
    entries: Vec<(String, Option<f64>)>,
}

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature, replacing an existing value in place if the name is taken
    pub fn insert(&mut self, name: &str, value: Option<f64>) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Look up a feature; the outer `Option` is presence, the inner is computability
    pub fn get(&self, name: &str) -> Option<Option<f64>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One speaker turn, with times in minutes from the start of the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Stable identifier, assigned once repair has fixed the final order
    pub id: Option<String>,
    /// Speaker tag as it appeared in the transcript
    pub speaker: Option<String>,
    /// Start time in minutes
    pub start_time: Option<f64>,
    /// End time in minutes (imputed from the next utterance's start)
    pub end_time: Option<f64>,
    /// Normalized text
    pub text: String,
    /// Computed features
    pub features: FeatureMap,
}

impl Utterance {
    /// Create an utterance as produced by line parsing: no id, no end time
    pub fn new(speaker: impl Into<String>, start_time: f64, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            start_time: Some(start_time),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Duration in seconds, if both boundaries are known
    pub fn duration_secs(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start) * 60.0),
            _ => None,
        }
    }

    /// Number of whitespace-separated words in the text
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.id {
            write!(f, "{} ", id)?;
        }
        if let Some(speaker) = &self.speaker {
            write!(f, "{} ", speaker)?;
        }
        if let Some(start) = self.start_time {
            write!(f, "[TIME: {}] ", format_min_sec(start))?;
        }
        write!(f, "{}", self.text)?;
        if let Some(end) = self.end_time {
            write!(f, " [TIME: {}]", format_min_sec(end))?;
        }
        Ok(())
    }
}

/// All utterances from one therapy session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Zero-padded session id extracted from the file name
    pub session_id: String,
    /// Session number extracted from the file name
    pub session_number: Option<u32>,
    /// File the transcript was read from
    pub source_path: Option<String>,
    /// Utterances in spoken order
    pub utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    /// Distinct speakers in order of first appearance
    pub fn speakers(&self) -> Vec<&str> {
        let mut speakers: Vec<&str> = Vec::new();
        for speaker in self.utterances.iter().filter_map(|u| u.speaker.as_deref()) {
            if !speakers.contains(&speaker) {
                speakers.push(speaker);
            }
        }
        speakers
    }

    /// Total number of (utterance, feature) pairs
    pub fn feature_count(&self) -> usize {
        self.utterances.iter().map(|u| u.features.len()).sum()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, utterance) in self.utterances.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", utterance)?;
        }
        Ok(())
    }
}

/// Format fractional minutes as MM:SS
pub fn format_min_sec(minutes: f64) -> String {
    let mut whole = minutes.floor() as u64;
    let mut seconds = ((minutes - minutes.floor()) * 60.0).round() as u64;
    if seconds == 60 {
        whole += 1;
        seconds = 0;
    }
    format!("{:02}:{:02}", whole, seconds)
}

/// Build a stable utterance id from the session id and a post-repair index
pub fn generate_utterance_id(session_id: &str, index: usize, width: usize) -> String {
    format!("{}_{:0width$}", session_id, index, width = width)
}
