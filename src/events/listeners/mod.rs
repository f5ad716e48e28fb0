//! Ready-made listeners for access events.
//!
//! [`LoggingListener`] writes every event through the `log` facade and
//! escalates ownership alerts to error level. [`TracingListener`] does the
//! same through `tracing` when that feature is on.

mod logging;
#[cfg(feature = "tracing")]
mod tracing;

pub use logging::LoggingListener;
#[cfg(feature = "tracing")]
pub use self::tracing::TracingListener;
