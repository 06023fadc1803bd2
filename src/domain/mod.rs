//! Core domain types for Neural Flow input handling

mod command;
mod context;
mod input;
mod intent;

pub use command::{CommandSource, MultiModalCommand};
pub use context::{
    EnvironmentalFactors, InteractionContext, PreferencesUpdate, UserPreferences, WorkContext,
};
pub use input::{
    AccessibilityRequirement, DeviceType, InputMode, LightingCondition, NetworkQuality, NoiseLevel,
    WorkMode,
};
pub use intent::CommandIntent;
pub(crate) use intent::clamp_confidence;
