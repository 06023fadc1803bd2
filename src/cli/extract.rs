//! Extract command implementation

use anyhow::{Context, Result};

use neuralflow::config::Config;
use neuralflow::intent::IntentExtractor;
use neuralflow::InteractionContext;

/// Print the intent extracted from `text` as JSON
pub fn extract_command(config: &Config, text: &str, task: Option<String>) -> Result<()> {
    let mut extractor = IntentExtractor::new(config.settings.orchestrator.intent_history_capacity);

    let mut context = InteractionContext::default().with_preferences(config.preferences.clone());
    context.work_context.current_task = task;

    match extractor.extract(text, Some(&context)) {
        Some(intent) => {
            let json = serde_json::to_string_pretty(&intent).context("Failed to serialize intent")?;
            println!("{}", json);
        }
        None => {
            eprintln!("No intent recognized for: {}", text);
        }
    }

    Ok(())
}
