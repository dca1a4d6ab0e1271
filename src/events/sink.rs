//! Event sink capability interface and the local buffer fallback.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::SinkError;
use crate::events::record::StageEvent;

/// A destination for stage-completion events. Delivery is best-effort;
/// the conversation never depends on a sink succeeding.
#[async_trait]
pub trait EventSink: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, event: &StageEvent) -> Result<(), SinkError>;
}

/// Append-only in-memory sink. Default fallback when no external sink is
/// configured or the external sink errors.
#[derive(Default)]
pub struct BufferSink {
    events: Mutex<Vec<StageEvent>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<StageEvent> {
        self.events.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}

#[async_trait]
impl EventSink for BufferSink {
    fn name(&self) -> &str {
        "buffer"
    }

    async fn deliver(&self, event: &StageEvent) -> Result<(), SinkError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}

/// Routes events to the primary sink, degrading to the local buffer when
/// the primary is absent or fails. Failures are logged, never surfaced.
pub struct EventDispatcher {
    primary: Option<Box<dyn EventSink>>,
    fallback: BufferSink,
}

impl EventDispatcher {
    pub fn new(primary: Option<Box<dyn EventSink>>) -> Self {
        Self {
            primary,
            fallback: BufferSink::new(),
        }
    }

    /// Deliver one event. Infallible by design: a failed primary delivery
    /// lands in the buffer instead.
    pub async fn dispatch(&self, event: StageEvent) {
        if let Some(primary) = &self.primary {
            match primary.deliver(&event).await {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!("Sink {} failed, buffering event {}: {e}", primary.name(), event.kind);
                }
            }
        }
        // BufferSink::deliver cannot fail
        let _ = self.fallback.deliver(&event).await;
    }

    pub fn buffered(&self) -> &BufferSink {
        &self.fallback
    }
}
