//! Event system for tournament access actions.
//!
//! Events are fired from every action that changes memberships, invitations
//! or ownership. If no listeners are registered, they are silently ignored.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tourney_access::register_event_listeners;
//! use tourney_access::events::listeners::LoggingListener;
//!
//! fn main() {
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//! }
//! ```
//!
//! # Alerting
//!
//! [`AccessEvent::OwnershipStateInconsistent`] means a tournament was left
//! without an owner. Route it to whatever pages an operator:
//!
//! ```rust,ignore
//! use tourney_access::events::{AccessEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct PagerListener;
//!
//! #[async_trait]
//! impl Listener for PagerListener {
//!     async fn handle(&self, event: &AccessEvent) {
//!         if event.is_alert() {
//!             // page the on-call operator
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AccessEvent;
pub use listener::Listener;
pub use registry::{EventRegistry, dispatch, register_event_listeners};
