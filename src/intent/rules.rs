//! Ordered intent rules
//!
//! Rules are plain data: the first rule whose pattern matches wins, so the
//! position of a rule in the list is its priority. Patterns are matched
//! case-insensitively against the trimmed input so captured entities keep
//! the user's casing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::warn;

/// How a captured entity is stored in the intent parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Captured text as typed
    Text,
    /// Captured text, lowercased (enumerated values like "high")
    Lowercase,
    /// Captured digits, stored as a JSON number
    Number,
}

/// Secondary pattern that pulls one typed field out of a matched input
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    pub field: String,
    pattern: Regex,
    kind: ValueKind,
}

impl EntityExtractor {
    /// The pattern must have one capture group holding the value
    pub fn new(field: impl Into<String>, pattern: &str, kind: ValueKind) -> Result<Self, regex::Error> {
        Ok(Self {
            field: field.into(),
            pattern: case_insensitive(pattern)?,
            kind,
        })
    }

    fn extract(&self, text: &str) -> Option<Value> {
        let captured = self.pattern.captures(text)?.get(1)?.as_str().trim();
        if captured.is_empty() {
            return None;
        }
        match self.kind {
            ValueKind::Text => Some(Value::from(captured)),
            ValueKind::Lowercase => Some(Value::from(captured.to_lowercase())),
            ValueKind::Number => captured.parse::<i64>().ok().map(Value::from),
        }
    }
}

/// One entry of the ordered rule list
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub action: String,
    pattern: Regex,
    extractors: Vec<EntityExtractor>,
    pub confidence: f64,
}

impl IntentRule {
    pub fn new(action: impl Into<String>, pattern: &str, confidence: f64) -> Result<Self, regex::Error> {
        Ok(Self {
            action: action.into(),
            pattern: case_insensitive(pattern)?,
            extractors: Vec::new(),
            confidence,
        })
    }

    /// Add an entity extractor. Several extractors may target the same
    /// field; the first one that captures something wins.
    pub fn with_extractor(mut self, extractor: EntityExtractor) -> Self {
        self.extractors.push(extractor);
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Run every extractor over the text
    pub fn extract_entities(&self, text: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        for extractor in &self.extractors {
            if fields.contains_key(&extractor.field) {
                continue;
            }
            if let Some(value) = extractor.extract(text) {
                fields.insert(extractor.field.clone(), value);
            }
        }
        fields
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", pattern))
}

struct RuleSpec {
    action: &'static str,
    pattern: &'static str,
    extractors: &'static [(&'static str, &'static str, ValueKind)],
    confidence: f64,
}

const DEFAULT_RULE_SPECS: &[RuleSpec] = &[
    RuleSpec {
        action: "set_priority",
        pattern: r"^(?:set|change|make)\s+(?:the\s+)?priority\s+(?:of\s+|for\s+)?.+?\s+to\s+(?:high|medium|low|urgent|critical)\b",
        extractors: &[
            (
                "task_name",
                r#"priority\s+(?:of\s+|for\s+)?(?:the\s+)?(?:task\s+)?["']?(.+?)["']?\s+to\s+\w+\s*$"#,
                ValueKind::Text,
            ),
            ("priority", r"\bto\s+(high|medium|low|urgent|critical)\b", ValueKind::Lowercase),
        ],
        confidence: 0.9,
    },
    RuleSpec {
        action: "create_task",
        pattern: r"^(?:create|add|make|new)\s+(?:a\s+|an\s+)?(?:new\s+)?(?:(?:high|medium|low|urgent)\s+priority\s+)?task\b",
        extractors: &[
            ("task_name", r#"(?:called|named|titled)\s+["']?(.+?)["']?\s*$"#, ValueKind::Text),
            ("task_name", r#"\btask\s*:\s*["']?(.+?)["']?\s*$"#, ValueKind::Text),
            ("task_name", r#"\btask\s+to\s+(.+?)\s*$"#, ValueKind::Text),
            ("priority", r"\b(high|medium|low|urgent)\s+priority\b", ValueKind::Lowercase),
        ],
        confidence: 0.9,
    },
    RuleSpec {
        action: "complete_task",
        pattern: r"^(?:(?:complete|finish|close)\s+(?:the\s+)?task\b|mark\s+(?:the\s+)?task\b.+\b(?:done|complete|completed|finished)\s*$)",
        extractors: &[(
            "task_name",
            r#"task\s+(?:called\s+|named\s+)?["']?(.+?)["']?(?:\s+as\s+(?:done|complete|completed|finished))?\s*$"#,
            ValueKind::Text,
        )],
        confidence: 0.88,
    },
    RuleSpec {
        action: "delete_task",
        pattern: r"^(?:delete|remove|cancel)\s+(?:the\s+)?task\b",
        extractors: &[(
            "task_name",
            r#"task\s+(?:called\s+|named\s+)?["']?(.+?)["']?\s*$"#,
            ValueKind::Text,
        )],
        confidence: 0.88,
    },
    RuleSpec {
        action: "create_project",
        pattern: r"^(?:create|start|add|new)\s+(?:a\s+)?(?:new\s+)?project\b",
        extractors: &[(
            "item_name",
            r#"(?:called|named|titled)\s+["']?(.+?)["']?\s*$"#,
            ValueKind::Text,
        )],
        confidence: 0.88,
    },
    RuleSpec {
        action: "schedule_meeting",
        pattern: r"^(?:schedule|book|set\s+up|arrange)\s+(?:a\s+)?(?:new\s+)?meeting\b",
        extractors: &[
            (
                "topic",
                r"\b(?:about|regarding)\s+(.+?)(?:\s+(?:at|today|tomorrow|next|on)\b.*)?\s*$",
                ValueKind::Text,
            ),
            (
                "participants",
                r"\bwith\s+(.+?)(?:\s+(?:about|regarding|at|today|tomorrow|next|on)\b.*)?\s*$",
                ValueKind::Text,
            ),
            ("time", r"\bat\s+(\d{1,2}(?::\d{2})?\s*(?:am|pm)?)", ValueKind::Lowercase),
            (
                "day",
                r"\b(today|tomorrow|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
                ValueKind::Lowercase,
            ),
        ],
        confidence: 0.87,
    },
    RuleSpec {
        action: "switch_mode",
        pattern: r"^(?:switch|change|go)\s+to\s+(?:the\s+)?\w+\s+(?:mode|layout)\b",
        extractors: &[("mode", r"\bto\s+(?:the\s+)?(\w+)\s+(?:mode|layout)\b", ValueKind::Lowercase)],
        confidence: 0.9,
    },
    RuleSpec {
        action: "start_timer",
        pattern: r"^(?:start|begin)\s+(?:a\s+)?(?:\d+\s*-?\s*(?:minutes?|mins?)\s+)?(?:focus\s+)?(?:timer|pomodoro|focus\s+session)\b",
        extractors: &[("duration_minutes", r"(\d+)\s*-?\s*(?:minutes?|mins?)\b", ValueKind::Number)],
        confidence: 0.85,
    },
    RuleSpec {
        action: "navigate",
        pattern: r"^(?:show|display|open|go\s+to)\s+(?:me\s+)?(?:the\s+|my\s+)?(?:dashboard|analytics|calendar|tasks|projects|settings|inbox|notes)\b",
        extractors: &[(
            "view",
            r"\b(dashboard|analytics|calendar|tasks|projects|settings|inbox|notes)\b",
            ValueKind::Lowercase,
        )],
        confidence: 0.85,
    },
    RuleSpec {
        action: "open_item",
        pattern: r"^open\s+\S",
        extractors: &[("item_name", r#"^open\s+(?:the\s+|my\s+)?["']?(.+?)["']?\s*$"#, ValueKind::Text)],
        confidence: 0.8,
    },
    RuleSpec {
        action: "search",
        pattern: r"^(?:search|find|look\s+up|look\s+for)\s+\S",
        extractors: &[
            (
                "query",
                r#"^(?:search|find|look\s+up|look\s+for)\s+(?:for\s+)?["']?(.+?)["']?\s*$"#,
                ValueKind::Text,
            ),
            ("topic", r"\b(?:about|on|regarding)\s+(.+?)\s*$", ValueKind::Text),
        ],
        confidence: 0.85,
    },
    RuleSpec {
        action: "help",
        pattern: r"^(?:help\b|what\s+can\s+you\s+do|show\s+(?:me\s+)?(?:the\s+)?commands\b)",
        extractors: &[],
        confidence: 0.95,
    },
];

fn compile(spec: &RuleSpec) -> Result<IntentRule, regex::Error> {
    let mut rule = IntentRule::new(spec.action, spec.pattern, spec.confidence)?;
    for (field, pattern, kind) in spec.extractors {
        rule = rule.with_extractor(EntityExtractor::new(*field, pattern, *kind)?);
    }
    Ok(rule)
}

static DEFAULT_RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    DEFAULT_RULE_SPECS
        .iter()
        .filter_map(|spec| match compile(spec) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(action = spec.action, "Skipping intent rule with invalid pattern: {}", e);
                None
            }
        })
        .collect()
});

/// The built-in rule list, most specific first
pub fn default_rules() -> Vec<IntentRule> {
    DEFAULT_RULES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_compile_in_order() {
        let actions: Vec<String> = default_rules().into_iter().map(|r| r.action).collect();
        assert_eq!(actions.first().map(String::as_str), Some("set_priority"));
        let set_priority = actions.iter().position(|a| a == "set_priority").unwrap();
        let search = actions.iter().position(|a| a == "search").unwrap();
        assert!(set_priority < search);
        let switch = actions.iter().position(|a| a == "switch_mode").unwrap();
        let navigate = actions.iter().position(|a| a == "navigate").unwrap();
        assert!(switch < navigate);
    }

    #[test]
    fn first_capturing_extractor_wins() {
        let rule = IntentRule::new("create_task", r"^add\s+task", 0.9)
            .unwrap()
            .with_extractor(EntityExtractor::new("task_name", r"called\s+(.+)$", ValueKind::Text).unwrap())
            .with_extractor(EntityExtractor::new("task_name", r"task\s+(.+)$", ValueKind::Text).unwrap());

        let fields = rule.extract_entities("add task called Write Docs");
        assert_eq!(fields["task_name"], "Write Docs");

        let fields = rule.extract_entities("add task Write Docs");
        assert_eq!(fields["task_name"], "Write Docs");
    }

    #[test]
    fn number_values_are_parsed() {
        let extractor = EntityExtractor::new("minutes", r"(\d+)\s*min", ValueKind::Number).unwrap();
        assert_eq!(extractor.extract("start 25 min timer"), Some(Value::from(25)));
        assert_eq!(extractor.extract("start a timer"), None);
    }
}
