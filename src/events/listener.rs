use async_trait::async_trait;

use super::AccessEvent;

/// Receives every [`AccessEvent`] fired by the tournament actions.
///
/// Handlers run inline in the action that fired the event, after its write
/// has succeeded, so keep them short or hand work off to a queue. Match on
/// the variant to pick out membership, invitation or ownership changes;
/// [`AccessEvent::is_alert`] marks the ones an operator must act on.
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use tourney_access::events::{AccessEvent, Listener};
///
/// struct AuditTrail;
///
/// #[async_trait]
/// impl Listener for AuditTrail {
///     async fn handle(&self, event: &AccessEvent) {
///         if let AccessEvent::MemberRoleChanged { membership_id, from, to, .. } = event {
///             // append "{membership_id}: {from} -> {to}" to the audit log
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &AccessEvent);
}
