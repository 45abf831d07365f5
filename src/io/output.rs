use std::io::Write;

use anyhow::Result;

use crate::models::{FeatureRow, Transcript, FEATURE_TABLE_HEADER};

/// Flatten a transcript into one row per (utterance, feature) pair
///
/// Rows follow utterance order, then feature order within each utterance.
pub fn to_rows(transcript: &Transcript) -> Vec<FeatureRow> {
    let mut rows = Vec::with_capacity(transcript.feature_count());

    for utterance in &transcript.utterances {
        for (name, value) in utterance.features.iter() {
            rows.push(FeatureRow {
                session_id: transcript.session_id.clone(),
                utterance_id: utterance.id.clone().unwrap_or_default(),
                speaker: utterance.speaker.clone().unwrap_or_default(),
                start_time: utterance.start_time,
                end_time: utterance.end_time,
                feature_name: name.to_string(),
                feature_value: value,
                text: utterance.text.clone(),
            });
        }
    }

    rows
}

/// Serialize a transcript as tab-separated rows, optionally preceded by the header
///
/// Fields are not escaped; text containing tabs or newlines will break the table.
pub fn to_tsv(transcript: &Transcript, include_header: bool) -> String {
    let mut output = String::new();

    if include_header {
        output.push_str(&FEATURE_TABLE_HEADER.join("\t"));
        output.push('\n');
    }

    for row in to_rows(transcript) {
        output.push_str(&row.to_fields().join("\t"));
        output.push('\n');
    }

    output
}

/// Write transcripts as one table, with the header before the first transcript only
///
/// Returns the number of data rows written.
pub fn write_tsv<W: Write>(writer: &mut W, transcripts: &[Transcript], include_header: bool) -> Result<usize> {
    let mut rows = 0;

    for (i, transcript) in transcripts.iter().enumerate() {
        let header = include_header && i == 0;
        writer.write_all(to_tsv(transcript, header).as_bytes())?;
        rows += transcript.feature_count();
    }

    writer.flush()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Utterance;

    fn featurized() -> Transcript {
        let mut transcript = Transcript::new("060504");
        let mut first = Utterance::new("T", 1.0, "i think so");
        first.id = Some("060504_000000".to_string());
        first.end_time = Some(1.5);
        first.features.insert("hedging", Some(1.0));
        first.features.insert("words_per_second", Some(0.1));

        let mut last = Utterance::new("P", 1.5, "maybe");
        last.id = Some("060504_000001".to_string());
        last.features.insert("hedging", Some(1.0));
        last.features.insert("words_per_second", None);

        transcript.utterances = vec![first, last];
        transcript
    }

    #[test]
    fn test_row_count_matches_feature_count() {
        let transcript = featurized();
        let rows = to_rows(&transcript);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.len(), transcript.feature_count());
        assert_eq!(rows[1].feature_name, "words_per_second");
        assert_eq!(rows[2].utterance_id, "060504_000001");
    }

    #[test]
    fn test_tsv_layout() {
        let tsv = to_tsv(&featurized(), true);
        let lines: Vec<&str> = tsv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "session_id\tline_id\tspeaker\tstart_time\tend_time\tfeature_name\tfeature_value\ttext"
        );
        assert_eq!(lines[1], "060504\t060504_000000\tT\t1\t1.5\thedging\t1\ti think so");
        assert_eq!(lines[4], "060504\t060504_000001\tP\t1.5\twords_per_second\t\tmaybe");
    }

    #[test]
    fn test_no_header_when_not_requested() {
        let tsv = to_tsv(&featurized(), false);
        assert!(tsv.starts_with("060504\t"));
    }

    #[test]
    fn test_write_tsv_header_once() {
        let transcripts = vec![featurized(), featurized()];
        let mut buffer = Vec::new();

        let rows = write_tsv(&mut buffer, &transcripts, true).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(rows, 8);
        assert_eq!(text.lines().count(), 9);
        assert_eq!(text.matches("session_id").count(), 1);
    }
}
