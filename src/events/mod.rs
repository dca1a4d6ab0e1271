//! Stage-completion events and the sinks that receive them.

pub mod record;
pub mod sink;
pub mod webhook;

pub use record::{EventKind, StageEvent};
pub use sink::{BufferSink, EventDispatcher, EventSink};
pub use webhook::WebhookSink;
