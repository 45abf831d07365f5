use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::PipelineError;
use crate::models::Utterance;

use super::Featurizer;

/// Source of word categories for lexicon counting
pub trait CategoryLexicon: Send + Sync {
    /// Categories a lowercase token belongs to; empty when it is not listed
    fn categories(&self, token: &str) -> &[String];
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    /// Categories for patterns ending in `*` at this node
    wildcard: Option<Vec<String>>,
    /// Categories for an exact word ending at this node
    terminal: Option<Vec<String>>,
}

/// LIWC `.dic` dictionary stored as a character trie
///
/// The file has a category section (`id<TAB>name`) between the first two
/// `%` lines, followed by word patterns (`pattern<TAB>id<TAB>id...`). A
/// pattern ending in `*` matches any word with that prefix.
#[derive(Debug, Default)]
pub struct LiwcDictionary {
    category_names: HashMap<String, String>,
    root: TrieNode,
    pattern_count: usize,
}

impl LiwcDictionary {
    /// Load a dictionary file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        Ok(Self::parse_with_origin(&content, &path.display().to_string())?)
    }

    /// Parse dictionary contents
    pub fn parse(content: &str) -> Result<Self, PipelineError> {
        Self::parse_with_origin(content, "<inline>")
    }

    fn parse_with_origin(content: &str, origin: &str) -> Result<Self, PipelineError> {
        let mut dictionary = Self::default();
        let mut percent_signs = 0;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
            if parts[0] == "%" {
                percent_signs += 1;
                continue;
            }

            match percent_signs {
                0 => continue,
                1 => {
                    let name = parts.get(1).ok_or_else(|| PipelineError::Lexicon {
                        origin: origin.to_string(),
                        line: line_no + 1,
                        reason: format!("category {:?} has no name", parts[0]),
                    })?;
                    dictionary
                        .category_names
                        .insert(parts[0].to_string(), name.to_string());
                }
                _ => {
                    let mut names = Vec::with_capacity(parts.len() - 1);
                    for id in &parts[1..] {
                        match dictionary.category_names.get(*id) {
                            Some(name) => names.push(name.clone()),
                            None => debug!(
                                "{}:{}: skipping unknown category id {:?} for {:?}",
                                origin,
                                line_no + 1,
                                id,
                                parts[0]
                            ),
                        }
                    }
                    dictionary.insert(parts[0], names);
                }
            }
        }

        Ok(dictionary)
    }

    fn insert(&mut self, pattern: &str, names: Vec<String>) {
        let mut cursor = &mut self.root;
        for c in pattern.chars() {
            if c == '*' {
                cursor.wildcard = Some(names);
                self.pattern_count += 1;
                return;
            }
            cursor = cursor.children.entry(c).or_default();
        }
        cursor.terminal = Some(names);
        self.pattern_count += 1;
    }

    /// Number of categories declared in the header
    pub fn category_count(&self) -> usize {
        self.category_names.len()
    }

    /// Number of word patterns loaded
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}

impl CategoryLexicon for LiwcDictionary {
    fn categories(&self, token: &str) -> &[String] {
        let mut node = &self.root;
        let mut chars = token.chars();

        loop {
            if let Some(names) = &node.wildcard {
                return names;
            }
            match chars.next() {
                None => return node.terminal.as_deref().unwrap_or(&[]),
                Some(c) => match node.children.get(&c) {
                    Some(child) => node = child,
                    None => return &[],
                },
            }
        }
    }
}

/// Counts the words of an utterance that fall into one lexicon category
pub struct LexiconCategoryFeaturizer {
    name: String,
    category: String,
    lexicon: Arc<dyn CategoryLexicon>,
}

impl LexiconCategoryFeaturizer {
    pub fn new(name: &str, category: &str, lexicon: Arc<dyn CategoryLexicon>) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            lexicon,
        }
    }
}

impl Featurizer for LexiconCategoryFeaturizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, utterance: &Utterance) -> Option<f64> {
        let lowered = utterance.text.to_lowercase();
        let count = lowered
            .split_whitespace()
            .filter(|token| {
                self.lexicon
                    .categories(token)
                    .iter()
                    .any(|c| *c == self.category)
            })
            .count();
        Some(count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIC: &str = "\
%
1\tpast
2\tpresent
3\tfuture
4\tverb
%
became\t1\t4
didn't\t1
spoken\t1
she'll\t3
admit\t2\t4
ain't\t2
you're\t2
we'll\t3
will\t3
may\t3
hope*\t2
hopeful\t9
";

    fn dictionary() -> Arc<dyn CategoryLexicon> {
        Arc::new(LiwcDictionary::parse(DIC).unwrap())
    }

    fn count(category: &str, text: &str) -> Option<f64> {
        let featurizer = LexiconCategoryFeaturizer::new("feature", category, dictionary());
        featurizer.value(&Utterance::new("P", 0.0, text))
    }

    #[test]
    fn test_parse_counts() {
        let dictionary = LiwcDictionary::parse(DIC).unwrap();
        assert_eq!(dictionary.category_count(), 4);
        assert_eq!(dictionary.pattern_count(), 12);
    }

    #[test]
    fn test_exact_lookup() {
        let dictionary = LiwcDictionary::parse(DIC).unwrap();
        assert_eq!(dictionary.categories("became"), ["past", "verb"]);
        assert!(dictionary.categories("becam").is_empty());
        assert!(dictionary.categories("becamex").is_empty());
    }

    #[test]
    fn test_wildcard_wins_over_longer_entries() {
        let dictionary = LiwcDictionary::parse(DIC).unwrap();
        assert_eq!(dictionary.categories("hope"), ["present"]);
        assert_eq!(dictionary.categories("hopeless"), ["present"]);
        assert_eq!(dictionary.categories("hopeful"), ["present"]);
        assert!(dictionary.categories("hop").is_empty());
    }

    #[test]
    fn test_past_category() {
        assert_eq!(count("past", "became didn't spoken she'll"), Some(3.0));
    }

    #[test]
    fn test_present_category_counts_repeats() {
        assert_eq!(count("present", "admit ain't you're admit"), Some(4.0));
    }

    #[test]
    fn test_future_category_is_case_insensitive() {
        assert_eq!(count("future", "We'll WILL may"), Some(3.0));
    }

    #[test]
    fn test_missing_category_name_is_an_error() {
        let result = LiwcDictionary::parse("%\n1\n%\n");
        assert!(matches!(result, Err(PipelineError::Lexicon { line: 2, .. })));
    }
}
