//! Environmental and host sensing
//!
//! Both concerns sit behind traits so hosts (and tests) can supply
//! deterministic implementations:
//! - [`EnvironmentSensor`]: noise, lighting, device, network, meeting state
//! - [`CapabilityProvider`]: which input modes the host supports

mod host;
mod sensor;

pub use host::{CapabilityProvider, HostCapabilities, HostInfo, StaticCapabilities};
pub use sensor::{
    AudioLevelSource, EnvironmentSample, EnvironmentSensor, FixedEnvironment,
    HeuristicEnvironmentSensor, MEETING_APPLICATIONS, NOISE_THRESHOLDS, detect_meeting,
    lighting_for_hour, noise_level_from_spectrum, time_of_day,
};
