use async_trait::async_trait;

use crate::events::{AccessEvent, Listener};

/// Logs all access events using the `log` crate.
///
/// Alert events are always logged at error level, whatever level the
/// listener was created with.
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }

    fn level_for(&self, event: &AccessEvent) -> log::Level {
        if event.is_alert() {
            log::Level::Error
        } else {
            self.level
        }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &AccessEvent) {
        log::log!(
            target: "tourney_access::events",
            self.level_for(event),
            "event={} tournament_id={} {:?}",
            event.name(),
            event.tournament_id(),
            event
        );
    }
}
