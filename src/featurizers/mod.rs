pub mod keywords;
pub mod lexicon;
pub mod polarity;
pub mod timing;

pub use keywords::*;
pub use lexicon::*;
pub use polarity::*;
pub use timing::*;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::PipelineConfig;
use crate::models::Utterance;

/// A named numeric signal computed from a single utterance
///
/// Featurizers hold only immutable state after construction, so one
/// instance can be shared across every transcript in a run.
pub trait Featurizer: Send + Sync {
    /// Feature name written to the output table
    fn name(&self) -> &str;

    /// Compute the value, or `None` when the utterance lacks the inputs
    fn value(&self, utterance: &Utterance) -> Option<f64>;

    /// Compute the (value, name) pair for an utterance
    fn featurize(&self, utterance: &Utterance) -> (Option<f64>, &str) {
        (self.value(utterance), self.name())
    }
}

/// LIWC categories featurized by default, as (feature name, category)
pub const DEFAULT_LIWC_FEATURES: [(&str, &str); 8] = [
    ("you_pronouns", "you"),
    ("they_pronouns", "they"),
    ("personal_pronouns", "ppron"),
    ("i_pronouns", "i"),
    ("we_pronouns", "we"),
    ("past_oriented", "past"),
    ("present_oriented", "present"),
    ("future_oriented", "future"),
];

/// Polarity categories featurized by default, as (feature name, category)
pub const DEFAULT_POLARITY_FEATURES: [(&str, &str); 2] =
    [("negative", "negative"), ("positive", "positive")];

/// Build the full featurizer set, loading both lexicons once
pub fn default_featurizers(config: &PipelineConfig) -> Result<Vec<Box<dyn Featurizer>>> {
    let liwc = LiwcDictionary::from_path(&config.liwc_path)
        .with_context(|| format!("Failed to load LIWC dictionary {:?}", config.liwc_path))?;
    let polarity = PolarityLexicon::from_path(&config.emolex_path)
        .with_context(|| format!("Failed to load polarity lexicon {:?}", config.emolex_path))?;

    info!(
        "Loaded LIWC dictionary ({} categories) and polarity lexicon ({} categories)",
        liwc.category_count(),
        polarity.category_count()
    );

    Ok(featurizers_from_lexicons(Arc::new(liwc), &polarity))
}

/// Build the full featurizer set from already-loaded lexicons
pub fn featurizers_from_lexicons(
    liwc: Arc<dyn CategoryLexicon>,
    polarity: &PolarityLexicon,
) -> Vec<Box<dyn Featurizer>> {
    let mut featurizers: Vec<Box<dyn Featurizer>> = Vec::new();

    for (name, category) in DEFAULT_LIWC_FEATURES {
        featurizers.push(Box::new(LexiconCategoryFeaturizer::new(
            name,
            category,
            Arc::clone(&liwc),
        )));
    }

    for (name, category) in DEFAULT_POLARITY_FEATURES {
        featurizers.push(Box::new(PolarityFeaturizer::new(name, polarity, category)));
    }

    featurizers.push(Box::new(KeywordFeaturizer::checking_for_understanding()));
    featurizers.push(Box::new(KeywordFeaturizer::demonstrating_understanding()));
    featurizers.push(Box::new(KeywordFeaturizer::hedging()));
    featurizers.push(Box::new(KeywordFeaturizer::absolutist()));

    featurizers.extend(timing_featurizers());
    featurizers
}

/// Featurizers that need no external lexicon
pub fn timing_featurizers() -> Vec<Box<dyn Featurizer>> {
    vec![
        Box::new(SecondsPerTalkTurnFeaturizer::default()),
        Box::new(WordsPerSecondFeaturizer::default()),
    ]
}
