use async_trait::async_trait;

use crate::events::{AccessEvent, Listener};

/// Emits access events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &AccessEvent) {
        if event.is_alert() {
            tracing::error!(
                target: "tourney_access::events",
                event_name = event.name(),
                tournament_id = event.tournament_id(),
                ?event,
                "access alert"
            );
        } else {
            tracing::info!(
                target: "tourney_access::events",
                event_name = event.name(),
                tournament_id = event.tournament_id(),
                ?event,
                "access event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_tracing_listener_handle() {
        let listener = TracingListener;
        let event = AccessEvent::OwnerMembershipCreated {
            tournament_id: "t1".to_owned(),
            user_id: "u1".to_owned(),
            at: Utc::now(),
        };

        // should not panic
        listener.handle(&event).await;
    }
}
