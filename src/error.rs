//! Error types for Fluxo Assist.

use crate::dialog::Stage;

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Event sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Template-library load/parse errors.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// No candidate file could be read and parsed. Callers are expected to
    /// fall back to an empty library instead of aborting.
    #[error("No library file could be loaded (tried: {})", tried.join(", "))]
    Unavailable { tried: Vec<String> },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Dialog state machine errors.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// The host sent an input kind the current stage cannot consume,
    /// e.g. a routine multi-choice while the machine is asking for a name.
    #[error("Stage {stage} expects {expected}")]
    UnexpectedInput {
        stage: Stage,
        expected: &'static str,
    },

    /// The conversation reached its terminal stage; only a reset is accepted.
    #[error("Conversation has ended; reset to start over")]
    Ended,
}

/// Export rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Event-sink delivery errors. These are never fatal to a conversation:
/// failed deliveries degrade to the local buffer.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Sink {name} failed to deliver: {reason}")]
    DeliveryFailed { name: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Result type alias for the assistant.
pub type Result<T> = std::result::Result<T, Error>;
