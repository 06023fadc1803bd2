//! Intent extraction from voice transcripts and typed commands
//!
//! Pipeline: ordered rule list → optional statistical classifier →
//! keyword buckets. The first stage that produces an intent wins.

mod extractor;
mod fallback;
mod rules;


pub use extractor::{CONTEXT_BOOST, IntentClassifier, IntentExtractor};
pub use fallback::{FALLBACK_CONFIDENCE, keyword_intent};
pub use rules::{EntityExtractor, IntentRule, ValueKind, default_rules};
