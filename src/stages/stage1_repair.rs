use tracing::debug;

use crate::error::PipelineError;
use crate::models::{generate_utterance_id, FeatureMap, Transcript, Utterance};

/// Configuration for Stage 1 repair
#[derive(Debug, Clone)]
pub struct Stage1Config {
    /// Zero-padding width of the utterance index in ids
    pub id_width: usize,
}

impl Default for Stage1Config {
    fn default() -> Self {
        Self { id_width: 6 }
    }
}

/// Result of Stage 1 repair
#[derive(Debug, Clone, Default)]
pub struct Stage1Result {
    /// Utterances removed because their text was empty
    pub blanks_dropped: usize,
    /// Utterances folded into their same-speaker predecessor
    pub utterances_merged: usize,
}

/// Perform Stage 1: repair segmentation artifacts
///
/// The passes run in a fixed order, each relying on the shape the previous
/// one leaves behind:
/// 1. Drop blank utterances
/// 2. Merge adjacent same-speaker utterances
/// 3. Impute end times from the next start time
/// 4. Assign ids from the final positions
pub fn execute_stage1(
    transcript: &mut Transcript,
    config: &Stage1Config,
) -> Result<Stage1Result, PipelineError> {
    let blanks_dropped = drop_blank_utterances(transcript);
    let utterances_merged = merge_same_speaker(transcript)?;
    impute_end_times(transcript);
    assign_utterance_ids(transcript, config.id_width);

    debug!(
        "Session {}: dropped {} blank, merged {}, {} utterances remain",
        transcript.session_id,
        blanks_dropped,
        utterances_merged,
        transcript.utterances.len()
    );

    Ok(Stage1Result {
        blanks_dropped,
        utterances_merged,
    })
}

/// Remove utterances with empty text, returning how many were removed
///
/// Must run before merging so an empty turn never separates two turns that
/// would otherwise stay apart.
pub fn drop_blank_utterances(transcript: &mut Transcript) -> usize {
    let before = transcript.utterances.len();
    transcript.utterances.retain(|u| !u.text.is_empty());
    before - transcript.utterances.len()
}

/// Fold runs of same-speaker utterances into one, returning the number folded
///
/// The merged utterance keeps the first start time, takes the last end time,
/// joins the texts with a single space and has no id or features.
/// Requires at least one utterance.
pub fn merge_same_speaker(transcript: &mut Transcript) -> Result<usize, PipelineError> {
    if transcript.utterances.is_empty() {
        return Err(PipelineError::EmptyTranscript {
            session_id: transcript.session_id.clone(),
        });
    }

    let mut merged: Vec<Utterance> = Vec::with_capacity(transcript.utterances.len());
    let mut folded = 0;

    for current in std::mem::take(&mut transcript.utterances) {
        match merged.last_mut() {
            Some(prev) if prev.speaker == current.speaker => {
                let text = format!("{} {}", prev.text, current.text).trim().to_string();
                *prev = Utterance {
                    id: None,
                    speaker: prev.speaker.take(),
                    start_time: prev.start_time,
                    end_time: current.end_time,
                    text,
                    features: FeatureMap::new(),
                };
                folded += 1;
            }
            _ => merged.push(current),
        }
    }

    transcript.utterances = merged;
    Ok(folded)
}

/// Set each end time to the next utterance's start time
///
/// The last utterance keeps an unknown end time.
pub fn impute_end_times(transcript: &mut Transcript) {
    for i in 1..transcript.utterances.len() {
        let next_start = transcript.utterances[i].start_time;
        transcript.utterances[i - 1].end_time = next_start;
    }
}

/// Assign `<session_id>_<index>` ids from the current positions
pub fn assign_utterance_ids(transcript: &mut Transcript, width: usize) {
    for (i, utterance) in transcript.utterances.iter_mut().enumerate() {
        utterance.id = Some(generate_utterance_id(&transcript.session_id, i, width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Six utterances, the fifth blank
    fn sample() -> Transcript {
        let mut transcript = Transcript::new("012345");
        transcript.utterances = vec![
            Utterance::new("P", 0.0, "line zero"),
            Utterance::new("T", 1.0, "line one"),
            Utterance::new("T", 2.0, "line two"),
            Utterance::new("P", 3.0, "line three"),
            Utterance::new("P", 4.0, ""),
            Utterance::new("T", 5.0, "line five"),
        ];
        transcript
    }

    #[test]
    fn test_drop_blank_utterances() {
        let mut transcript = sample();
        assert_eq!(drop_blank_utterances(&mut transcript), 1);
        assert_eq!(transcript.utterances.len(), 5);
        assert_eq!(transcript.utterances[3].text, "line three");
        assert_eq!(transcript.utterances[4].text, "line five");
    }

    #[test]
    fn test_merge_same_speaker() {
        let mut transcript = sample();
        merge_same_speaker(&mut transcript).unwrap();
        assert_eq!(transcript.utterances[1].text, "line one line two");
        assert_eq!(transcript.utterances[1].start_time, Some(1.0));
        assert_eq!(transcript.utterances[2].text, "line three");
    }

    #[test]
    fn test_drop_then_merge() {
        let mut transcript = sample();
        drop_blank_utterances(&mut transcript);
        let folded = merge_same_speaker(&mut transcript).unwrap();

        assert_eq!(folded, 1);
        let texts: Vec<&str> = transcript.utterances.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, vec!["line zero", "line one line two", "line three", "line five"]);
    }

    #[test]
    fn test_merge_folds_long_runs() {
        let mut transcript = Transcript::new("000001");
        transcript.utterances = vec![
            Utterance::new("T", 0.0, "a"),
            Utterance::new("P", 1.0, "b"),
            Utterance::new("P", 2.0, "c"),
            Utterance::new("P", 3.0, "d"),
            Utterance::new("T", 4.0, "e"),
        ];
        transcript.utterances[3].end_time = Some(3.5);

        assert_eq!(merge_same_speaker(&mut transcript).unwrap(), 2);
        assert_eq!(transcript.utterances.len(), 3);

        let merged = &transcript.utterances[1];
        assert_eq!(merged.text, "b c d");
        assert_eq!(merged.start_time, Some(1.0));
        assert_eq!(merged.end_time, Some(3.5));
        assert_eq!(merged.id, None);
    }

    #[test]
    fn test_merge_trims_joined_text() {
        let mut transcript = Transcript::new("000001");
        transcript.utterances = vec![Utterance::new("T", 0.0, ""), Utterance::new("T", 1.0, "b")];
        merge_same_speaker(&mut transcript).unwrap();
        assert_eq!(transcript.utterances[0].text, "b");
    }

    #[test]
    fn test_merge_empty_transcript_fails() {
        let mut transcript = Transcript::new("000001");
        let result = merge_same_speaker(&mut transcript);
        assert!(matches!(
            result,
            Err(PipelineError::EmptyTranscript { ref session_id }) if session_id == "000001"
        ));
    }

    #[test]
    fn test_impute_end_times() {
        let mut transcript = sample();
        impute_end_times(&mut transcript);

        let n = transcript.utterances.len();
        for i in 0..n - 1 {
            assert_eq!(
                transcript.utterances[i].end_time,
                transcript.utterances[i + 1].start_time
            );
        }
        assert_eq!(transcript.utterances[0].end_time, Some(1.0));
        assert_eq!(transcript.utterances[n - 1].end_time, None);
    }

    #[test]
    fn test_impute_on_empty_is_a_no_op() {
        let mut transcript = Transcript::new("000001");
        impute_end_times(&mut transcript);
        assert!(transcript.utterances.is_empty());
    }

    #[test]
    fn test_assign_utterance_ids() {
        let mut transcript = sample();
        assign_utterance_ids(&mut transcript, 6);
        assert_eq!(transcript.utterances[0].id.as_deref(), Some("012345_000000"));
        assert_eq!(transcript.utterances[5].id.as_deref(), Some("012345_000005"));
    }

    #[test]
    fn test_execute_stage1_uses_post_repair_positions() {
        let mut transcript = sample();
        let result = execute_stage1(&mut transcript, &Stage1Config::default()).unwrap();

        assert_eq!(result.blanks_dropped, 1);
        assert_eq!(result.utterances_merged, 1);
        assert_eq!(transcript.utterances.len(), 4);

        for (i, utterance) in transcript.utterances.iter().enumerate() {
            assert_eq!(utterance.id, Some(format!("012345_{:06}", i)));
        }
        assert_eq!(transcript.utterances[1].end_time, Some(3.0));
        assert_eq!(transcript.utterances[3].id.as_deref(), Some("012345_000003"));
        assert_eq!(transcript.utterances[3].text, "line five");
        assert_eq!(transcript.utterances[3].end_time, None);
    }

    #[test]
    fn test_adjacent_speakers_differ_after_repair() {
        let mut transcript = sample();
        execute_stage1(&mut transcript, &Stage1Config::default()).unwrap();
        for pair in transcript.utterances.windows(2) {
            assert_ne!(pair[0].speaker, pair[1].speaker);
        }
    }

    #[test]
    fn test_all_blank_transcript_fails() {
        let mut transcript = Transcript::new("000009");
        transcript.utterances = vec![Utterance::new("T", 0.0, "")];
        assert!(execute_stage1(&mut transcript, &Stage1Config::default()).is_err());
    }
}
