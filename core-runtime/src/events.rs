//! # Event Bus System
//!
//! Provides an event-driven architecture for the back-office core using
//! `tokio::sync::broadcast`. Modules publish typed events; the hosting UI
//! subscribes to refresh screens without polling core state.
//!
//! ## Usage
//!
//! ### Creating an Event Bus
//!
//! ```rust
//! use core_runtime::events::EventBus;
//!
//! let event_bus = EventBus::new(100); // Buffer size of 100 events
//! ```
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, SessionEvent};
//!
//! # let event_bus = EventBus::new(100);
//! let event = CoreEvent::Session(SessionEvent::SignedIn {
//!     user_id: "u-123".to_string(),
//! });
//!
//! event_bus.emit(event).ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => {
//!                 eprintln!("Missed {} events", n);
//!             }
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! `RecvError::Lagged(n)` is non-fatal (the subscriber was too slow and
//! missed `n` events); `RecvError::Closed` signals shutdown.

use tokio::sync::broadcast;

/// Which mutation a catalog module performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Activate,
    Deactivate,
    Delete,
}

/// Session lifecycle events.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A sign-in completed and the session is authenticated.
    SignedIn { user_id: String },
    /// The session was cleared.
    SignedOut,
    /// A persisted session was restored at process start.
    Restored { authenticated: bool },
    /// Sign-in or restore failed.
    SessionError { message: String },
}

/// Remote-collection synchronization events.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// The cached collection was replaced from the server.
    Refreshed {
        resource: &'static str,
        count: usize,
    },
    /// A mutation was accepted by the server.
    Mutated {
        resource: &'static str,
        kind: MutationKind,
        entity_id: Option<String>,
    },
    /// An operation failed; `message` is the user-readable error.
    OperationFailed {
        resource: &'static str,
        message: String,
    },
}

/// Top-level event type emitted on the bus.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    Session(SessionEvent),
    Catalog(CatalogEvent),
}

/// Central broadcast channel for core events.
///
/// Cloning the bus clones the sender; every clone publishes into the same
/// channel. Subscribers created before an emit receive it, later ones don't.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received the event. An `Err`
    /// only means there are no subscribers, which callers routinely ignore.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, broadcast::error::SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Create a new subscription to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit(CoreEvent::Session(SessionEvent::SignedOut)).unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, CoreEvent::Session(SessionEvent::SignedOut)));
    }

    #[tokio::test]
    async fn test_emit_without_subscribers() {
        let bus = EventBus::new(16);
        // No subscribers: emit reports an error but must not panic.
        assert!(bus
            .emit(CoreEvent::Session(SessionEvent::SignedOut))
            .is_err());
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(CoreEvent::Catalog(CatalogEvent::Refreshed {
            resource: "fournisseurs",
            count: 3,
        }))
        .unwrap();

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await.unwrap() {
                CoreEvent::Catalog(CatalogEvent::Refreshed { resource, count }) => {
                    assert_eq!(resource, "fournisseurs");
                    assert_eq!(count, 3);
                }
                other => panic!("Unexpected event: {:?}", other),
            }
        }
    }
}
