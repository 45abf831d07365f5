use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Utterance;

use super::{Featurizer, TermCounter};

/// Word-level emotion lexicon of `word category flag` triples
#[derive(Debug, Clone, Default)]
pub struct PolarityLexicon {
    /// Category -> words flagged `1` for it
    flagged: HashMap<String, BTreeSet<String>>,
}

impl PolarityLexicon {
    /// Load a lexicon file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        Ok(Self::parse(&content))
    }

    /// Parse lexicon contents; lines that are not triples are ignored
    pub fn parse(content: &str) -> Self {
        let mut lexicon = Self::default();

        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[word, category, flag] = fields.as_slice() else {
                continue;
            };
            let words = lexicon.flagged.entry(category.to_string()).or_default();
            if flag == "1" {
                words.insert(word.to_string());
            }
        }

        lexicon
    }

    /// Words flagged for a category
    pub fn words_for(&self, category: &str) -> Vec<&str> {
        self.flagged
            .get(category)
            .map(|words| words.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of categories seen in the file
    pub fn category_count(&self) -> usize {
        self.flagged.len()
    }
}

/// Counts occurrences of the words a polarity lexicon flags for one category
pub struct PolarityFeaturizer {
    name: String,
    terms: TermCounter,
}

impl PolarityFeaturizer {
    pub fn new(name: &str, lexicon: &PolarityLexicon, category: &str) -> Self {
        Self {
            name: name.to_string(),
            terms: TermCounter::new(lexicon.words_for(category)),
        }
    }

    /// Number of words in the retained set
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

impl Featurizer for PolarityFeaturizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, utterance: &Utterance) -> Option<f64> {
        Some(self.terms.count(&utterance.text) as f64)
    }
}
