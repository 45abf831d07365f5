use serde::{Deserialize, Serialize};

/// Column names of the long feature table
pub const FEATURE_TABLE_HEADER: [&str; 8] = [
    "session_id",
    "line_id",
    "speaker",
    "start_time",
    "end_time",
    "feature_name",
    "feature_value",
    "text",
];

/// One (utterance, feature) pair of the long feature table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub session_id: String,
    pub utterance_id: String,
    pub speaker: String,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub feature_name: String,
    pub feature_value: Option<f64>,
    pub text: String,
}

impl FeatureRow {
    /// Field values in output order
    ///
    /// The end time column is left out entirely when the end time is
    /// unknown, so rows for a transcript's last utterance are one field short.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(FEATURE_TABLE_HEADER.len());
        fields.push(self.session_id.clone());
        fields.push(self.utterance_id.clone());
        fields.push(self.speaker.clone());
        fields.push(format_optional(self.start_time));
        if let Some(end) = self.end_time {
            fields.push(end.to_string());
        }
        fields.push(self.feature_name.clone());
        fields.push(format_optional(self.feature_value));
        fields.push(self.text.clone());
        fields
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(end_time: Option<f64>, value: Option<f64>) -> FeatureRow {
        FeatureRow {
            session_id: "060504".to_string(),
            utterance_id: "060504_000003".to_string(),
            speaker: "T".to_string(),
            start_time: Some(20.25),
            end_time,
            feature_name: "hedging".to_string(),
            feature_value: value,
            text: "i think so".to_string(),
        }
    }

    #[test]
    fn test_fields_with_end_time() {
        let fields = row(Some(20.5), Some(1.0)).to_fields();
        assert_eq!(
            fields,
            vec!["060504", "060504_000003", "T", "20.25", "20.5", "hedging", "1", "i think so"]
        );
    }

    #[test]
    fn test_missing_end_time_drops_the_column() {
        let fields = row(None, None).to_fields();
        assert_eq!(fields.len(), FEATURE_TABLE_HEADER.len() - 1);
        assert_eq!(fields[4], "hedging");
        assert_eq!(fields[5], "");
    }
}
