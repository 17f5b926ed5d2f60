//! Observer registration and fan-out.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::error::DeployError;
use crate::events::SyncEvent;

/// A sink for workflow events.
///
/// Observers are called synchronously, in registration order, from the
/// task running the workflow. A panicking observer unwinds into that
/// task; observers that want isolation must not panic.
pub trait Observer: Send + Sync {
    /// Receives a named event.
    ///
    /// `payload` is set only when the event was produced by classifying a
    /// [`DeployError`] that carries diagnostic detail. A session that
    /// finishes but reports failure produces the same event name with no
    /// payload.
    fn notify(&self, event: SyncEvent, payload: Option<&DeployError>);

    /// Receives a failure that has no named event.
    fn notify_error(&self, message: &str);
}

/// Ordered collection of observers. Duplicates are allowed.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: Vec<Arc<dyn Observer>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Arc<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers `event` to every observer in registration order.
    pub fn notify(&self, event: SyncEvent, payload: Option<&DeployError>) {
        for observer in &self.observers {
            observer.notify(event, payload);
        }
    }

    /// Delivers `message` on the generic error channel.
    pub fn notify_error(&self, message: &str) {
        for observer in &self.observers {
            observer.notify_error(message);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Writes every event to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: SyncEvent, payload: Option<&DeployError>) {
        match payload {
            Some(e) => warn!(event = %event, error = %e, "sync event"),
            None if event.is_error() => warn!(event = %event, "sync event"),
            None => info!(event = %event, "sync event"),
        }
    }

    fn notify_error(&self, message: &str) {
        error!(error = %message, "sync failure");
    }
}

/// An event as seen by a [`ChannelObserver`] consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Event {
        event: SyncEvent,
        payload: Option<DeployError>,
    },
    Error(String),
}

/// Forwards events into an mpsc channel.
///
/// Sends never block; if the receiver is gone or full, the event is
/// dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<ObservedEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ObservedEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl Observer for ChannelObserver {
    fn notify(&self, event: SyncEvent, payload: Option<&DeployError>) {
        let _ = self.tx.try_send(ObservedEvent::Event {
            event,
            payload: payload.cloned(),
        });
    }

    fn notify_error(&self, message: &str) {
        let _ = self.tx.try_send(ObservedEvent::Error(message.to_string()));
    }
}
