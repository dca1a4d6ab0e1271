//! Dialog state machine — the guided conversation that picks a segment,
//! departments and routines, then hands off to the export renderers.

pub mod collector;
pub mod conversation;
pub mod engine;
pub mod prompts;
pub mod stage;

pub use collector::{SelectionEntry, collect_all, collect_chosen};
pub use conversation::{Answers, Conversation, Message, Role};
pub use engine::{DepartmentRoutines, DialogEngine, DialogInput, RoutineChoice, Turn};
pub use stage::{ExpectedInput, Stage};
