use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Transcript;

/// Load previously featurized transcripts
pub fn load_cache(path: &Path) -> Result<Vec<Transcript>> {
    let file = File::open(path).with_context(|| format!("Failed to open cache: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse cache: {:?}", path))
}

/// Store featurized transcripts so later runs can skip parsing
pub fn save_cache(path: &Path, transcripts: &[Transcript]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, transcripts).context("Failed to write cache")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Utterance;

    #[test]
    fn test_cache_preserves_transcripts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts.json");

        let mut transcript = Transcript::new("000042");
        transcript.session_number = Some(4);
        let mut utterance = Utterance::new("T", 0.5, "so how was the week");
        utterance.id = Some("000042_000000".to_string());
        utterance.features.insert("hedging", Some(0.0));
        utterance.features.insert("words_per_second", None);
        transcript.utterances.push(utterance);

        save_cache(&path, std::slice::from_ref(&transcript)).unwrap();
        let loaded = load_cache(&path).unwrap();

        assert_eq!(loaded, vec![transcript]);
    }

    #[test]
    fn test_cache_preserves_computed_rates_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts.json");

        let mut transcript = Transcript::new("000042");
        for words in 1..=40u32 {
            for hundredths in 1..=50u32 {
                let seconds = hundredths as f64 * 0.43;
                let start = (words * 50 + hundredths) as f64 / 7.0;
                let mut utterance = Utterance::new("P", start, "so");
                utterance.end_time = Some(start + seconds / 60.0);
                utterance
                    .features
                    .insert("words_per_second", Some(words as f64 / seconds));
                transcript.utterances.push(utterance);
            }
        }

        save_cache(&path, std::slice::from_ref(&transcript)).unwrap();
        let loaded = load_cache(&path).unwrap();

        let mismatches = transcript
            .utterances
            .iter()
            .zip(&loaded[0].utterances)
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(mismatches, 0);
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_cache(&path).is_err());
    }
}
