use std::sync::OnceLock;

use super::{AccessEvent, Listener};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// The listeners tournament actions notify, in registration order.
///
/// Built once through [`register_event_listeners`] and never changed after.
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener. Chain calls to add several.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Number of listeners registered so far.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    async fn dispatch(&self, event: &AccessEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Installs the process-wide listeners for membership, invitation and
/// ownership events.
///
/// Call it during startup, before the first action runs. Until then events
/// go nowhere. A second call is ignored and logged at warn level.
///
/// ```rust,ignore
/// use tourney_access::events::listeners::LoggingListener;
/// use tourney_access::register_event_listeners;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::with_level(log::Level::Debug));
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "tourney_access",
            "register_event_listeners called more than once, ignoring"
        );
    }
}

/// Hands `event` to each installed listener in turn and waits for all of
/// them. Does nothing when [`register_event_listeners`] was never called.
pub async fn dispatch(event: AccessEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
