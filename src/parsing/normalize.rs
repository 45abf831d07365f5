use once_cell::sync::Lazy;
use regex::Regex;

/// Annotator comments such as `[LAUGHTER]`, matched non-greedily within a line
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid bracket pattern"));

/// Punctuation removed from utterance text; the apostrophe is absent so contractions survive
const STRIPPED_PUNCTUATION: &str = "!\"#$%&()*+,-./:;<=>?@[]^_`{|}~";

/// Normalize utterance text for counting
///
/// Lowercases, removes bracketed annotator comments, strips punctuation
/// (keeping apostrophes) and collapses whitespace. Idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let uncommented = BRACKETED.replace_all(&lowered, "");
    let stripped: String = uncommented
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
