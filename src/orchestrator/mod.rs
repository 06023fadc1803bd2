//! Multi-modal orchestration
//!
//! [`MultiModalOrchestrator`] owns the recognition channels, turns their
//! output into [`MultiModalCommand`](crate::domain::MultiModalCommand)s,
//! keeps the interaction context adapted and publishes everything on an
//! [`EventBus`].

mod engine;
mod events;
mod metrics;
mod providers;

pub use engine::{ChannelState, LifecycleState, MultiModalOrchestrator};
pub use events::{EventBus, EventHandler, EventKind, InteractionEvent, SubscriptionId};
pub use metrics::{MetricsTracker, PerformanceMetrics};
pub use providers::{
    HandFrame, ProviderStatus, QueuedSpeechProvider, QueuedVideoSource, SpeechError, SpeechEvent,
    SpeechHandle, SpeechProvider, VideoHandle, VideoSource,
};
