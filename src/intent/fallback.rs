//! Coarse keyword buckets used when no rule matched

use serde_json::Value;

use crate::domain::CommandIntent;

/// Confidence of a keyword-bucket intent
pub const FALLBACK_CONFIDENCE: f64 = 0.6;

/// Minimum Jaro-Winkler similarity for a misspelled keyword
const FUZZY_THRESHOLD: f64 = 0.92;

/// Words shorter than this are only matched exactly
const FUZZY_MIN_LEN: usize = 4;

const BUCKETS: &[(&str, &[&str])] = &[
    ("create", &["create", "add", "make", "new", "build"]),
    ("delete", &["delete", "remove", "erase", "trash", "discard"]),
    ("update", &["update", "edit", "change", "modify", "rename"]),
    ("show", &["show", "display", "view", "list", "open"]),
    ("search", &["search", "find", "lookup", "locate"]),
    ("help", &["help", "assist", "support", "how"]),
];

/// Map the input to a general intent by keyword, tolerating small typos.
/// Exact keyword hits take precedence over fuzzy ones.
pub fn keyword_intent(text: &str) -> Option<CommandIntent> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    let bucket = exact_bucket(&words).or_else(|| fuzzy_bucket(&words))?;
    Some(CommandIntent::new(bucket, FALLBACK_CONFIDENCE).with_parameter("raw_text", Value::from(text)))
}

fn exact_bucket(words: &[String]) -> Option<&'static str> {
    BUCKETS
        .iter()
        .find(|(_, keywords)| words.iter().any(|w| keywords.contains(&w.as_str())))
        .map(|(action, _)| *action)
}

fn fuzzy_bucket(words: &[String]) -> Option<&'static str> {
    let mut best: Option<(&'static str, f64)> = None;
    for word in words.iter().filter(|w| w.chars().count() >= FUZZY_MIN_LEN) {
        for (action, keywords) in BUCKETS {
            for keyword in keywords.iter().filter(|k| k.len() >= FUZZY_MIN_LEN) {
                let similarity = strsim::jaro_winkler(word, keyword);
                if similarity >= FUZZY_THRESHOLD && best.is_none_or(|(_, s)| similarity > s) {
                    best = Some((action, similarity));
                }
            }
        }
    }
    best.map(|(action, _)| action)
}
