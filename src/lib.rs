//! Neural Flow - adaptive multi-modal input
//!
//! Neural Flow interprets keyboard, voice and hand-gesture input as
//! structured commands and keeps choosing the input mode that best fits the
//! user's context: meeting state, ambient noise, lighting, device, work mode
//! and accessibility needs.
//!
//! ## Pipeline
//!
//! 1. **Recognition**: speech transcripts go through the [`intent`]
//!    extractor, hand landmarks through the [`gesture`] classifier.
//! 2. **Adaptation**: the [`adaptation`] selector applies contextual rules
//!    and capability scores to pick the active [`InputMode`].
//! 3. **Orchestration**: the [`orchestrator`] wires providers, context
//!    sampling ([`environment`]) and an event bus for the UI layer.

pub mod adaptation;
pub mod config;
pub mod domain;
pub mod environment;
pub mod error;
pub mod gesture;
pub mod intent;
pub mod orchestrator;

pub use domain::*;
pub use error::InteractionError;
