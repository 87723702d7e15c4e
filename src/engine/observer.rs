//! Observer registration and isolated dispatch.
//!
//! Handlers are called after the engine lock has been released. Each call is
//! isolated: an error or a panic in one handler is logged and the remaining
//! handlers still run.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use super::event::{ChatMessage, GameEvent};

/// Error returned by a failing handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Receives game notifications.
pub type EventHandler = Arc<dyn Fn(&GameEvent) -> Result<(), HandlerError> + Send + Sync>;

/// Receives chat messages.
pub type MessageHandler = Arc<dyn Fn(&ChatMessage) -> Result<(), HandlerError> + Send + Sync>;

/// Registered observers.
///
/// Guarded by its own lock so registration never waits on phase
/// processing, and handlers may register further handlers.
#[derive(Default)]
pub struct Observers {
    events: RwLock<Vec<EventHandler>>,
    messages: RwLock<Vec<MessageHandler>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(&GameEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: EventHandler = Arc::new(handler);
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    pub fn add_message_handler<F>(&self, handler: F)
    where
        F: Fn(&ChatMessage) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let handler: MessageHandler = Arc::new(handler);
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    /// Number of registered event handlers.
    pub fn event_handler_count(&self) -> usize {
        self.events.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Deliver events to every event handler, in order.
    pub fn notify_events(&self, events: &[GameEvent]) {
        if events.is_empty() {
            return;
        }
        let handlers = self.events.read().unwrap_or_else(PoisonError::into_inner).clone();
        for event in events {
            dispatch(&handlers, event, "event");
        }
    }

    /// Deliver a chat message to every message handler.
    pub fn notify_message(&self, message: &ChatMessage) {
        let handlers = self.messages.read().unwrap_or_else(PoisonError::into_inner).clone();
        dispatch(&handlers, message, "message");
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("events", &self.event_handler_count())
            .field(
                "messages",
                &self.messages.read().unwrap_or_else(PoisonError::into_inner).len(),
            )
            .finish()
    }
}

fn dispatch<T: ?Sized>(
    handlers: &[Arc<dyn Fn(&T) -> Result<(), HandlerError> + Send + Sync>],
    item: &T,
    kind: &'static str,
) {
    for (index, handler) in handlers.iter().enumerate() {
        match panic::catch_unwind(AssertUnwindSafe(|| handler(item))) {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(handler = index, kind, %error, "observer failed"),
            Err(_) => warn!(handler = index, kind, "observer panicked"),
        }
    }
}
