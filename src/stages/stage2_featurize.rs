use crate::featurizers::Featurizer;
use crate::models::{Transcript, Utterance};

/// Result of Stage 2 featurization
#[derive(Debug, Clone, Default)]
pub struct Stage2Result {
    /// (utterance, feature) pairs computed
    pub features_computed: usize,
    /// Pairs whose featurizer could not produce a value
    pub null_values: usize,
}

/// Perform Stage 2: apply every featurizer to every utterance
///
/// Features are stored in featurizer order. Uncomputable values are stored
/// as `None` rather than skipped.
pub fn execute_stage2(transcript: &mut Transcript, featurizers: &[Box<dyn Featurizer>]) -> Stage2Result {
    let mut result = Stage2Result::default();

    for utterance in &mut transcript.utterances {
        let nulls = calculate_features(utterance, featurizers);
        result.features_computed += featurizers.len();
        result.null_values += nulls;
    }

    result
}

/// Compute all features for one utterance, returning how many were `None`
pub fn calculate_features(utterance: &mut Utterance, featurizers: &[Box<dyn Featurizer>]) -> usize {
    let mut nulls = 0;
    for featurizer in featurizers {
        let (value, name) = featurizer.featurize(utterance);
        if value.is_none() {
            nulls += 1;
        }
        utterance.features.insert(name, value);
    }
    nulls
}
