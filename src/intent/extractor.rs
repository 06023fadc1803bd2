//! Text → command intent

use std::collections::VecDeque;

use serde_json::Value;
use tracing::{debug, warn};

use super::fallback::keyword_intent;
use super::rules::{IntentRule, default_rules};
use crate::domain::{CommandIntent, InteractionContext};

/// Confidence added when an intent refers to the task or project in focus
pub const CONTEXT_BOOST: f64 = 0.1;

/// Fields that may become the primary entity, in order of preference
const ENTITY_FIELDS: [&str; 4] = ["task_name", "item_name", "query", "topic"];

/// Optional statistical classifier consulted when no rule matches
///
/// Best effort: errors and panics are logged and ignored.
pub trait IntentClassifier: Send {
    fn classify(&self, text: &str) -> anyhow::Result<Option<CommandIntent>>;
}

/// Extracts command intents from voice transcripts and typed commands
pub struct IntentExtractor {
    rules: Vec<IntentRule>,
    classifier: Option<Box<dyn IntentClassifier>>,
    history: VecDeque<String>,
    history_capacity: usize,
}

impl Default for IntentExtractor {
    fn default() -> Self {
        Self::new(10)
    }
}

impl IntentExtractor {
    /// Create an extractor with the built-in rules
    pub fn new(history_capacity: usize) -> Self {
        Self {
            rules: default_rules(),
            classifier: None,
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.set_classifier(classifier);
        self
    }

    pub fn set_classifier(&mut self, classifier: Box<dyn IntentClassifier>) {
        self.classifier = Some(classifier);
    }

    /// The rule list, in evaluation order
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Append a rule (lowest priority)
    pub fn add_rule(&mut self, rule: IntentRule) {
        self.rules.push(rule);
    }

    /// Insert a rule at `index`; everything from `index` on moves down one place
    pub fn insert_rule(&mut self, index: usize, rule: IntentRule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    /// Recent normalized inputs, oldest first
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Extract an intent from `text`, optionally enhanced with the current context
    pub fn extract(&mut self, text: &str, context: Option<&InteractionContext>) -> Option<CommandIntent> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.remember(trimmed.to_lowercase());

        let mut intent = self
            .match_rules(trimmed)
            .or_else(|| self.classify(trimmed))
            .or_else(|| keyword_intent(trimmed))?;

        if let Some(context) = context {
            enhance_with_context(&mut intent, context);
        }

        debug!(
            action = %intent.action,
            entity = ?intent.entity,
            confidence = intent.confidence(),
            "Extracted intent"
        );
        Some(intent)
    }

    fn remember(&mut self, normalized: String) {
        if self.history_capacity == 0 {
            return;
        }
        while self.history.len() >= self.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(normalized);
    }

    fn match_rules(&self, text: &str) -> Option<CommandIntent> {
        let rule = self.rules.iter().find(|rule| rule.matches(text))?;

        let mut intent = CommandIntent::new(rule.action.clone(), rule.confidence);
        intent.parameters = rule.extract_entities(text);
        intent.entity = ENTITY_FIELDS
            .iter()
            .find_map(|field| intent.parameter_str(field).map(str::to_string));
        Some(intent)
    }

    fn classify(&self, text: &str) -> Option<CommandIntent> {
        let classifier = self.classifier.as_ref()?;
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| classifier.classify(text)));
        match outcome {
            Ok(Ok(intent)) => intent,
            Ok(Err(e)) => {
                debug!("Intent classifier failed, falling back to keywords: {}", e);
                None
            }
            Err(_) => {
                warn!("Intent classifier panicked, falling back to keywords");
                None
            }
        }
    }
}

/// Boost confidence for intents about the task or project in focus and
/// merge context fields into the parameters without overwriting extracted ones
fn enhance_with_context(intent: &mut CommandIntent, context: &InteractionContext) {
    let work = &context.work_context;

    if intent.action.contains("task") && work.current_task.is_some() {
        intent.boost(CONTEXT_BOOST);
    }
    if intent.action.contains("project") && work.current_project.is_some() {
        intent.boost(CONTEXT_BOOST);
    }

    if let Some(task) = &work.current_task {
        intent
            .parameters
            .entry("current_task")
            .or_insert_with(|| Value::from(task.as_str()));
    }
    if let Some(project) = &work.current_project {
        intent
            .parameters
            .entry("current_project")
            .or_insert_with(|| Value::from(project.as_str()));
    }
    intent
        .parameters
        .entry("work_mode")
        .or_insert_with(|| Value::from(work.work_mode.as_str()));
    intent
        .parameters
        .entry("time_of_day")
        .or_insert_with(|| Value::from(work.time_of_day.as_str()));
}
