//! Environmental sampling heuristics
//!
//! Noise and lighting here are coarse proxies (analyser amplitude average,
//! hour of day), not calibrated sensors. Anything smarter plugs in through
//! [`EnvironmentSensor`] without touching the mode selector.

use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use super::host::HostInfo;
use crate::domain::{EnvironmentalFactors, InteractionContext, LightingCondition, NoiseLevel};

/// Upper bounds (exclusive) of the average analyser magnitude for
/// quiet, moderate and loud; anything above is very loud
pub const NOISE_THRESHOLDS: [f64; 3] = [30.0, 60.0, 100.0];

/// Applications whose presence means the user is in a call
pub const MEETING_APPLICATIONS: &[&str] = &["zoom", "teams", "meet", "webex", "skype", "whereby"];

/// One environment reading
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSample {
    pub factors: EnvironmentalFactors,
    pub time_of_day: String,
}

/// Samples the environment on every context refresh
pub trait EnvironmentSensor: Send {
    fn sample(&mut self, context: &InteractionContext, now: NaiveDateTime) -> EnvironmentSample;

    /// Release any capture resources held for sampling
    fn shutdown(&mut self) {}
}

/// Live microphone analyser (frequency bins, 0-255 each)
pub trait AudioLevelSource: Send {
    /// Latest frequency data, or `None` if no audio is available right now
    fn frequency_data(&mut self) -> Option<Vec<u8>>;

    fn release(&mut self) {}
}

/// Bucket the average analyser magnitude into a noise level
pub fn noise_level_from_spectrum(bins: &[u8]) -> Option<NoiseLevel> {
    if bins.is_empty() {
        return None;
    }
    let average = bins.iter().map(|&b| f64::from(b)).sum::<f64>() / bins.len() as f64;
    let level = if average < NOISE_THRESHOLDS[0] {
        NoiseLevel::Quiet
    } else if average < NOISE_THRESHOLDS[1] {
        NoiseLevel::Moderate
    } else if average < NOISE_THRESHOLDS[2] {
        NoiseLevel::Loud
    } else {
        NoiseLevel::VeryLoud
    };
    Some(level)
}

/// Lighting guessed from the hour of day
pub fn lighting_for_hour(hour: u32) -> LightingCondition {
    match hour {
        9..17 => LightingCondition::Bright,
        7..9 | 17..19 => LightingCondition::Normal,
        5..7 | 19..22 => LightingCondition::Dim,
        _ => LightingCondition::Dark,
    }
}

pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        5..12 => "morning",
        12..17 => "afternoon",
        17..21 => "evening",
        _ => "night",
    }
}

/// True if any active application looks like a video call
pub fn detect_meeting(active_applications: &[String]) -> bool {
    active_applications.iter().any(|app| {
        let app = app.to_lowercase();
        MEETING_APPLICATIONS.iter().any(|m| app.contains(m))
    })
}

/// Default sensor: host facts plus optional microphone analysis
pub struct HeuristicEnvironmentSensor {
    host: HostInfo,
    audio: Option<Box<dyn AudioLevelSource>>,
}

impl HeuristicEnvironmentSensor {
    pub fn new(host: HostInfo) -> Self {
        Self { host, audio: None }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioLevelSource>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }
}

impl EnvironmentSensor for HeuristicEnvironmentSensor {
    fn sample(&mut self, context: &InteractionContext, now: NaiveDateTime) -> EnvironmentSample {
        let hour = now.hour();
        let previous = context.environmental_factors;

        let noise_level = self
            .audio
            .as_mut()
            .and_then(|audio| audio.frequency_data())
            .and_then(|bins| noise_level_from_spectrum(&bins))
            .unwrap_or(previous.noise_level);

        let factors = EnvironmentalFactors {
            is_in_meeting: detect_meeting(&context.work_context.active_applications),
            noise_level,
            lighting_condition: lighting_for_hour(hour),
            device_type: self.host.device_type(),
            network_quality: self.host.network_quality(),
        };
        debug!(?factors, "Sampled environment");

        EnvironmentSample {
            factors,
            time_of_day: time_of_day(hour).to_string(),
        }
    }

    fn shutdown(&mut self) {
        if let Some(mut audio) = self.audio.take() {
            audio.release();
        }
    }
}

/// Returns the same factors every time; for tests and manual overrides
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment {
    pub factors: EnvironmentalFactors,
}

impl FixedEnvironment {
    pub fn new(factors: EnvironmentalFactors) -> Self {
        Self { factors }
    }
}

impl EnvironmentSensor for FixedEnvironment {
    fn sample(&mut self, _context: &InteractionContext, now: NaiveDateTime) -> EnvironmentSample {
        EnvironmentSample {
            factors: self.factors,
            time_of_day: time_of_day(now.hour()).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceType;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    struct Spectrum(Option<Vec<u8>>);

    impl AudioLevelSource for Spectrum {
        fn frequency_data(&mut self) -> Option<Vec<u8>> {
            self.0.clone()
        }
    }

    #[test]
    fn noise_buckets() {
        assert_eq!(noise_level_from_spectrum(&[10, 20]), Some(NoiseLevel::Quiet));
        assert_eq!(noise_level_from_spectrum(&[40, 50]), Some(NoiseLevel::Moderate));
        assert_eq!(noise_level_from_spectrum(&[90, 80]), Some(NoiseLevel::Loud));
        assert_eq!(noise_level_from_spectrum(&[200, 180]), Some(NoiseLevel::VeryLoud));
        assert_eq!(noise_level_from_spectrum(&[]), None);
    }

    #[test]
    fn lighting_and_time_of_day_follow_the_clock() {
        assert_eq!(lighting_for_hour(10), LightingCondition::Bright);
        assert_eq!(lighting_for_hour(18), LightingCondition::Normal);
        assert_eq!(lighting_for_hour(20), LightingCondition::Dim);
        assert_eq!(lighting_for_hour(23), LightingCondition::Dark);
        assert_eq!(time_of_day(8), "morning");
        assert_eq!(time_of_day(13), "afternoon");
        assert_eq!(time_of_day(19), "evening");
        assert_eq!(time_of_day(2), "night");
    }

    #[test]
    fn meeting_detected_from_active_apps() {
        assert!(detect_meeting(&["Zoom Meeting".to_string()]));
        assert!(!detect_meeting(&["Visual Studio Code".to_string()]));
    }

    #[test]
    fn heuristic_sensor_combines_sources() {
        let host = HostInfo {
            screen_width: 390,
            ..HostInfo::default()
        };
        let mut sensor =
            HeuristicEnvironmentSensor::new(host).with_audio(Box::new(Spectrum(Some(vec![150; 8]))));
        let mut context = InteractionContext::default();
        context.work_context.active_applications = vec!["Microsoft Teams".to_string()];

        let sample = sensor.sample(&context, at(21));
        assert_eq!(sample.factors.noise_level, NoiseLevel::VeryLoud);
        assert_eq!(sample.factors.device_type, DeviceType::Mobile);
        assert_eq!(sample.factors.lighting_condition, LightingCondition::Dim);
        assert!(sample.factors.is_in_meeting);
        assert_eq!(sample.time_of_day, "night");
    }

    #[test]
    fn missing_audio_keeps_previous_noise_level() {
        let mut sensor =
            HeuristicEnvironmentSensor::new(HostInfo::default()).with_audio(Box::new(Spectrum(None)));
        let mut context = InteractionContext::default();
        context.environmental_factors.noise_level = NoiseLevel::Loud;

        let sample = sensor.sample(&context, at(10));
        assert_eq!(sample.factors.noise_level, NoiseLevel::Loud);
    }
}
