use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Utterance;

use super::Featurizer;

static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word pattern"));

/// Phrases a therapist uses to check they have understood the patient
pub const CHECKING_FOR_UNDERSTANDING_TERMS: &[&str] = &[
    "it sounds like",
    "you seem to be saying",
    "let me make sure",
    "heard you correctly",
    "let me see",
    "sounds like",
    "seems like",
    "it seems",
    "it sounds",
    "that seems",
    "that sounds",
    "this seems",
    "this sounds",
    "you seem",
    "you sound",
];

/// Phrases a therapist uses to show they have understood the patient
pub const DEMONSTRATING_UNDERSTANDING_TERMS: &[&str] = &[
    "i hear you",
    "i see",
    "i understand",
    "i can see",
    "i get that",
    "gotcha",
];

/// Hedging markers
pub const HEDGING_TERMS: &[&str] = &[
    "think",
    "thought",
    "thinking",
    "almost",
    "apparent",
    "apparently",
    "appear",
    "appeared",
    "appears",
    "approximately",
    "around",
    "assume",
    "assumed",
    "certain amount",
    "certain extent",
    "certain level",
    "claim",
    "claimed",
    "doubt",
    "doubtful",
    "essentially",
    "estimate",
    "estimated",
    "feel",
    "felt",
    "frequently",
    "from our perspective",
    "generally",
    "guess",
    "in general",
    "in most cases",
    "in most instances",
    "in our view",
    "indicate",
    "indicated",
    "largely",
    "likely",
    "mainly",
    "may",
    "maybe",
    "might",
    "mostly",
    "often",
    "on the whole",
    "ought",
    "perhaps",
    "plausible",
    "plausibly",
    "possible",
    "possibly",
    "postulate",
    "postulated",
    "presumable",
    "probable",
    "probably",
    "relatively",
    "roughly",
    "seems",
    "should",
    "sometimes",
    "somewhat",
    "suggest",
    "suggested",
    "suppose",
    "suspect",
    "tend to",
    "tends to",
    "typical",
    "typically",
    "uncertain",
    "uncertainly",
    "unclear",
    "unclearly",
    "unlikely",
    "usually",
    "broadly",
    "tended to",
    "presumably",
    "suggests",
    "from this perspective",
    "from my perspective",
    "in my view",
    "in this view",
    "in our opinion",
    "in my opinion",
    "to my knowledge",
    "fairly",
    "quite",
    "rather",
    "argue",
    "argues",
    "argued",
    "claims",
    "feels",
    "indicates",
    "supposed",
    "supposes",
    "suspects",
    "postulates",
];

/// Absolutist markers
pub const ABSOLUTIST_TERMS: &[&str] = &[
    "absolutely",
    "all",
    "always",
    "complete",
    "completely",
    "constant",
    "constantly",
    "definitely",
    "entire",
    "ever",
    "every",
    "everyone",
    "everything",
    "full",
    "must",
    "never",
    "nothing",
    "totally",
    "whole",
];

/// Counts case-insensitive, word-bounded occurrences of a fixed term list
///
/// Each listed term contributes its own match count, so a phrase counts once
/// per full-phrase match and overlapping list entries ("sounds like" and "it
/// sounds like") both count. Terms made only of word characters are matched
/// against whole word runs; everything else gets its own `\b...\b` regex.
#[derive(Debug, Clone, Default)]
pub struct TermCounter {
    /// Lowercased single-word terms with their multiplicity in the list
    words: HashMap<String, usize>,
    phrases: Vec<Regex>,
}

impl TermCounter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = Self::default();

        for term in terms {
            let term = term.as_ref().to_lowercase();
            if term.is_empty() {
                continue;
            }
            if WORD_RUN.find(&term).is_some_and(|m| m.as_str().len() == term.len()) {
                *counter.words.entry(term).or_insert(0) += 1;
            } else {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&term));
                // Escaped literals always compile
                if let Ok(regex) = Regex::new(&pattern) {
                    counter.phrases.push(regex);
                }
            }
        }

        counter
    }

    /// Total occurrences of all terms in `text`
    pub fn count(&self, text: &str) -> usize {
        let word_hits: usize = if self.words.is_empty() {
            0
        } else {
            WORD_RUN
                .find_iter(text)
                .filter_map(|m| self.words.get(&m.as_str().to_lowercase()))
                .sum()
        };

        let phrase_hits: usize = self
            .phrases
            .iter()
            .map(|regex| regex.find_iter(text).count())
            .sum();

        word_hits + phrase_hits
    }

    /// Number of distinct terms held
    pub fn len(&self) -> usize {
        self.words.len() + self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts occurrences of a fixed keyword or phrase list
pub struct KeywordFeaturizer {
    name: String,
    terms: TermCounter,
}

impl KeywordFeaturizer {
    pub fn new(name: &str, terms: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            terms: TermCounter::new(terms),
        }
    }

    pub fn checking_for_understanding() -> Self {
        Self::new("checking_for_understanding", CHECKING_FOR_UNDERSTANDING_TERMS)
    }

    pub fn demonstrating_understanding() -> Self {
        Self::new("demonstrating_understanding", DEMONSTRATING_UNDERSTANDING_TERMS)
    }

    pub fn hedging() -> Self {
        Self::new("hedging", HEDGING_TERMS)
    }

    pub fn absolutist() -> Self {
        Self::new("absolutist", ABSOLUTIST_TERMS)
    }
}

impl Featurizer for KeywordFeaturizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, utterance: &Utterance) -> Option<f64> {
        Some(self.terms.count(&utterance.text) as f64)
    }
}
