use crate::models::Utterance;

use super::Featurizer;

/// Length of the talk turn in seconds
pub struct SecondsPerTalkTurnFeaturizer {
    name: String,
}

impl Default for SecondsPerTalkTurnFeaturizer {
    fn default() -> Self {
        Self {
            name: "seconds_per_talk_turn".to_string(),
        }
    }
}

impl Featurizer for SecondsPerTalkTurnFeaturizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, utterance: &Utterance) -> Option<f64> {
        utterance.duration_secs()
    }
}

/// Speech rate of the talk turn
///
/// `None` when the duration is unknown or not positive, or the turn has no words.
pub struct WordsPerSecondFeaturizer {
    name: String,
}

impl Default for WordsPerSecondFeaturizer {
    fn default() -> Self {
        Self {
            name: "words_per_second".to_string(),
        }
    }
}

impl Featurizer for WordsPerSecondFeaturizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self, utterance: &Utterance) -> Option<f64> {
        let duration = utterance.duration_secs()?;
        let words = utterance.word_count();
        if duration > 0.0 && words > 0 {
            Some(words as f64 / duration)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(text: &str, start: Option<f64>, end: Option<f64>) -> Utterance {
        Utterance {
            start_time: start,
            end_time: end,
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_seconds_per_talk_turn() {
        let featurizer = SecondsPerTalkTurnFeaturizer::default();
        assert_eq!(featurizer.value(&utterance("a b", Some(1.0), Some(1.5))), Some(30.0));
        assert_eq!(featurizer.value(&utterance("a b", Some(1.0), None)), None);
        assert_eq!(featurizer.value(&utterance("a b", None, Some(1.5))), None);
    }

    #[test]
    fn test_words_per_second() {
        let featurizer = WordsPerSecondFeaturizer::default();
        let value = featurizer
            .value(&utterance("one two three", Some(2.0), Some(2.1)))
            .unwrap();
        assert!((value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_words_per_second_guards() {
        let featurizer = WordsPerSecondFeaturizer::default();
        assert_eq!(featurizer.value(&utterance("a b", Some(1.0), None)), None);
        assert_eq!(featurizer.value(&utterance("a b", Some(1.0), Some(1.0))), None);
        assert_eq!(featurizer.value(&utterance("a b", Some(2.0), Some(1.0))), None);
        assert_eq!(featurizer.value(&utterance("", Some(1.0), Some(2.0))), None);
    }
}
