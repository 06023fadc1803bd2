//! Host capability detection
//!
//! Facts such as touch points, speech and camera support or network
//! quality are plain data handed in by whoever embeds the pipeline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{DeviceType, InputMode, NetworkQuality};

/// Facts about the host the pipeline runs on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    pub user_agent: String,
    /// Screen width in CSS pixels
    pub screen_width: u32,
    pub max_touch_points: u32,
    pub speech_recognition: bool,
    pub camera: bool,
    pub eye_tracker: bool,
    pub online: bool,
    /// Network Information API effective type ("slow-2g", "2g", "3g", "4g")
    pub effective_connection_type: Option<String>,
}

impl Default for HostInfo {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            screen_width: 1920,
            max_touch_points: 0,
            speech_recognition: false,
            camera: false,
            eye_tracker: false,
            online: true,
            effective_connection_type: None,
        }
    }
}

impl HostInfo {
    /// Host description for a native terminal session
    pub fn native() -> Self {
        Self {
            user_agent: format!(
                "neuralflow/{} ({})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS
            ),
            ..Self::default()
        }
    }

    /// Classify the device from the user agent, then the screen width
    pub fn device_type(&self) -> DeviceType {
        let ua = self.user_agent.to_lowercase();
        if ua.contains("ipad") || ua.contains("tablet") || (ua.contains("android") && !ua.contains("mobile")) {
            return DeviceType::Tablet;
        }
        if ua.contains("mobi") || ua.contains("iphone") {
            return DeviceType::Mobile;
        }
        match self.screen_width {
            0..768 => DeviceType::Mobile,
            768..1024 => DeviceType::Tablet,
            1024..=1440 => DeviceType::Laptop,
            _ => DeviceType::Desktop,
        }
    }

    pub fn network_quality(&self) -> NetworkQuality {
        if !self.online {
            return NetworkQuality::Offline;
        }
        match self.effective_connection_type.as_deref() {
            Some("slow-2g") | Some("2g") => NetworkQuality::Poor,
            Some("3g") => NetworkQuality::Good,
            Some("4g") => NetworkQuality::Excellent,
            _ => NetworkQuality::Good,
        }
    }
}

/// Reports which input modes the host can offer
pub trait CapabilityProvider: Send {
    fn available_modes(&self) -> BTreeSet<InputMode>;
}

/// Capabilities derived from a [`HostInfo`]
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    pub host: HostInfo,
}

impl HostCapabilities {
    pub fn new(host: HostInfo) -> Self {
        Self { host }
    }
}

impl CapabilityProvider for HostCapabilities {
    fn available_modes(&self) -> BTreeSet<InputMode> {
        let mut modes = BTreeSet::from([InputMode::Keyboard, InputMode::Mouse]);
        if self.host.max_touch_points > 0 {
            modes.insert(InputMode::Touch);
        }
        if self.host.speech_recognition {
            modes.insert(InputMode::Voice);
        }
        if self.host.camera {
            modes.insert(InputMode::Gesture);
            if self.host.eye_tracker {
                modes.insert(InputMode::EyeTracking);
            }
        }
        modes
    }
}

/// A fixed set of modes, for tests and non-browser hosts
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilities {
    modes: BTreeSet<InputMode>,
}

impl StaticCapabilities {
    pub fn new(modes: impl IntoIterator<Item = InputMode>) -> Self {
        Self {
            modes: modes.into_iter().collect(),
        }
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn available_modes(&self) -> BTreeSet<InputMode> {
        let mut modes = self.modes.clone();
        modes.insert(InputMode::Keyboard);
        modes.insert(InputMode::Mouse);
        modes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_type_from_user_agent() {
        let phone = HostInfo {
            user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0) Mobile/15E148".to_string(),
            ..HostInfo::default()
        };
        assert_eq!(phone.device_type(), DeviceType::Mobile);

        let tablet = HostInfo {
            user_agent: "Mozilla/5.0 (Linux; Android 14; SM-X710)".to_string(),
            ..HostInfo::default()
        };
        assert_eq!(tablet.device_type(), DeviceType::Tablet);
    }

    #[test]
    fn device_type_from_screen_width() {
        let laptop = HostInfo {
            screen_width: 1366,
            ..HostInfo::default()
        };
        assert_eq!(laptop.device_type(), DeviceType::Laptop);
        assert_eq!(HostInfo::default().device_type(), DeviceType::Desktop);
    }

    #[test]
    fn network_quality_buckets() {
        let mut host = HostInfo {
            effective_connection_type: Some("2g".to_string()),
            ..HostInfo::default()
        };
        assert_eq!(host.network_quality(), NetworkQuality::Poor);
        host.effective_connection_type = Some("4g".to_string());
        assert_eq!(host.network_quality(), NetworkQuality::Excellent);
        host.online = false;
        assert_eq!(host.network_quality(), NetworkQuality::Offline);
    }

    #[test]
    fn host_capabilities_follow_host_apis() {
        let caps = HostCapabilities::new(HostInfo {
            max_touch_points: 5,
            speech_recognition: true,
            ..HostInfo::default()
        });
        let modes = caps.available_modes();
        assert!(modes.contains(&InputMode::Touch));
        assert!(modes.contains(&InputMode::Voice));
        assert!(!modes.contains(&InputMode::Gesture));
        assert!(modes.contains(&InputMode::Keyboard));
    }
}
