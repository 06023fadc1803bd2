//! Recommend command implementation

use anyhow::Result;

use neuralflow::adaptation::{InputModeSelector, RecommendationSource};
use neuralflow::config::Config;
use neuralflow::{
    DeviceType, EnvironmentalFactors, InputMode, InteractionContext, LightingCondition, NoiseLevel,
    WorkMode,
};

/// Context described on the command line
pub struct Scenario {
    pub meeting: bool,
    pub noise: NoiseLevel,
    pub device: DeviceType,
    pub lighting: LightingCondition,
    pub work: WorkMode,
    pub modes: Vec<InputMode>,
    pub prefer: Vec<InputMode>,
}

impl Scenario {
    fn context(&self, config: &Config) -> InteractionContext {
        let mut preferences = config.preferences.clone();
        if !self.prefer.is_empty() {
            preferences.preferred_input_methods = self.prefer.clone();
        }

        InteractionContext::new(self.modes.iter().copied().collect())
            .with_preferences(preferences)
            .with_work_mode(self.work)
            .with_environment(EnvironmentalFactors {
                is_in_meeting: self.meeting,
                noise_level: self.noise,
                lighting_condition: self.lighting,
                device_type: self.device,
                ..EnvironmentalFactors::default()
            })
    }
}

/// Print the recommended mode and the capability table
pub fn recommend_command(config: &Config, scenario: Scenario) -> Result<()> {
    let selector = InputModeSelector::new(&config.settings.adaptation, config.settings.heuristics.clone());
    let context = scenario.context(config);
    let recommendation = selector.recommend(&context);

    let source = match &recommendation.source {
        RecommendationSource::Rule { name } => format!("rule {}", name),
        RecommendationSource::Preference => "preference".to_string(),
        RecommendationSource::Score => "score".to_string(),
        RecommendationSource::Fallback => "fallback".to_string(),
    };
    println!(
        "Recommended: {} (confidence {:.2}, {})",
        recommendation.mode, recommendation.confidence, source
    );
    println!("  {}\n", recommendation.reason);

    println!(
        "  {:<13} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "mode", "rel", "eff", "acc", "env", "score"
    );
    for capability in selector.capabilities(&context) {
        let marker = if capability.mode == recommendation.mode { "*" } else { " " };
        println!(
            "{} {:<13} {:>6.2} {:>6.2} {:>6.2} {:>6.2} {:>6.2}",
            marker,
            capability.mode,
            capability.reliability,
            capability.efficiency,
            capability.accessibility,
            capability.environmental_suitability,
            capability.score
        );
    }

    let matching: Vec<String> = selector
        .matching_rules(&context)
        .iter()
        .map(|rule| format!("{} ({})", rule.name, rule.priority))
        .collect();
    if !matching.is_empty() {
        println!("\nMatching rules: {}", matching.join(", "));
    }

    Ok(())
}
