//! Board event bus
//!
//! One [`EventBus`] is created per session and handed to every component
//! that announces state changes. Subscribers are called synchronously, in
//! registration order, on the thread that published. Publishing never does
//! I/O, it only fans the event out.
//!
//! The subscriber list is snapshotted before dispatch, so a callback may
//! subscribe, unsubscribe or read session state without deadlocking.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::types::Square;
use crate::networking::GameOutcome;

/// State change announced to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    SquareSelected(Square),
    SquareDeselected,
    /// A new position string was adopted
    BoardUpdated,
    MoveAdded {
        from: Square,
        to: Square,
        half_move: u32,
    },
    HistoryCleared,
    /// A move sequence is waiting on the move authority
    ThinkingStarted,
    ThinkingFinished,
    GameOver(GameOutcome),
}

/// Coarse event kind, for subscribers that redraw on categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SelectionChanged,
    BoardUpdated,
    MoveAdded,
    HistoryCleared,
    Thinking,
    GameOver,
}

impl BoardEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BoardEvent::SquareSelected(_) | BoardEvent::SquareDeselected => EventKind::SelectionChanged,
            BoardEvent::BoardUpdated => EventKind::BoardUpdated,
            BoardEvent::MoveAdded { .. } => EventKind::MoveAdded,
            BoardEvent::HistoryCleared => EventKind::HistoryCleared,
            BoardEvent::ThinkingStarted | BoardEvent::ThinkingFinished => EventKind::Thinking,
            BoardEvent::GameOver(_) => EventKind::GameOver,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::SelectionChanged => "SELECTION_CHANGED",
            EventKind::BoardUpdated => "BOARD_UPDATED",
            EventKind::MoveAdded => "MOVE_ADDED",
            EventKind::HistoryCleared => "HISTORY_CLEARED",
            EventKind::Thinking => "THINKING",
            EventKind::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&BoardEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Session-owned synchronous fan-out of [`BoardEvent`]s
///
/// Cloning the bus yields another handle to the same subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; the same callback may be registered twice
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&BoardEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a callback, returns `false` if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock();
        let before = registry.listeners.len();
        registry.listeners.retain(|(listener_id, _)| *listener_id != id);
        registry.listeners.len() != before
    }

    /// Call every subscriber with `event`, in registration order
    pub fn publish(&self, event: &BoardEvent) {
        let listeners: Vec<Listener> = self
            .registry
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!("[EVENTS] {} -> {} subscriber(s)", event.kind(), listeners.len());
        for listener in listeners {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().listeners.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
