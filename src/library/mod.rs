//! Template library — the in-memory catalog of segment → department →
//! routine → ordered steps.

pub mod loader;
pub mod model;
pub mod resolver;

pub use model::{Library, Routine, SegmentCatalog};
pub use resolver::{FALLBACK_DEPARTMENT, MASTER_DEPARTMENTS, available_departments, routines_for};
