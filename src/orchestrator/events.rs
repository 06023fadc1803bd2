//! Typed events and the subscriber registry

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adaptation::ModeChange;
use crate::domain::{InputMode, InteractionContext, MultiModalCommand};

/// Event categories handlers subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Command,
    ModeChange,
    Error,
    ContextUpdate,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Command,
        EventKind::ModeChange,
        EventKind::Error,
        EventKind::ContextUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Command => "command",
            EventKind::ModeChange => "mode_change",
            EventKind::Error => "error",
            EventKind::ContextUpdate => "context_update",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events published to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// A recognized command
    Command(MultiModalCommand),
    /// The active input mode changed
    ModeChange(ModeChange),
    /// A recognition channel reported a problem
    Error { source: InputMode, message: String },
    /// The interaction context changed significantly
    ContextUpdate(InteractionContext),
}

impl InteractionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InteractionEvent::Command(_) => EventKind::Command,
            InteractionEvent::ModeChange(_) => EventKind::ModeChange,
            InteractionEvent::Error { .. } => EventKind::Error,
            InteractionEvent::ContextUpdate(_) => EventKind::ContextUpdate,
        }
    }
}

/// Event handler. Returning an error (or panicking) is logged and does not
/// affect other handlers.
pub type EventHandler = Box<dyn FnMut(&InteractionEvent) -> anyhow::Result<()> + Send>;

/// Token returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: EventHandler,
}

/// Subscriber registry keyed by event kind
///
/// Dispatch is synchronous and follows registration order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&InteractionEvent) -> anyhow::Result<()> + Send + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a handler. Returns false if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver an event to every handler of its kind.
    /// Returns the number of handlers that completed successfully.
    pub fn emit(&mut self, event: &InteractionEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;

        for subscription in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            let handler = &mut subscription.handler;
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    warn!(kind = %kind, subscription = subscription.id.0, "Event handler failed: {:#}", e)
                }
                Err(_) => warn!(kind = %kind, subscription = subscription.id.0, "Event handler panicked"),
            }
        }

        debug!(kind = %kind, delivered, "Event dispatched");
        delivered
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
