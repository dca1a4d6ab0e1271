//! Library file loading and schema normalization.
//!
//! Two schemas are understood. The preferred shape nests departments:
//!
//! ```json
//! { "templates_by_segment": { "<Segmento>": { "setores": {
//!     "<Setor>": { "rotinas": [ { "nome": "...", "etapas": ["..."] } ] }
//! } } } }
//! ```
//!
//! The legacy shape (`{"templates": {"<Segmento>": {"rotinas": [...]}}}`)
//! has no departments; its routines are placed under a synthetic `"Geral"`
//! department per segment.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::LibraryError;
use crate::library::model::{Library, Routine, SegmentCatalog};
use crate::library::resolver::FALLBACK_DEPARTMENT;

#[derive(Debug, Deserialize)]
struct PreferredSchema {
    templates_by_segment: BTreeMap<String, SegmentBlock>,
}

#[derive(Debug, Deserialize)]
struct SegmentBlock {
    #[serde(default)]
    setores: BTreeMap<String, DepartmentBlock>,
}

#[derive(Debug, Deserialize)]
struct DepartmentBlock {
    #[serde(default)]
    rotinas: Vec<Routine>,
}

#[derive(Debug, Deserialize)]
struct LegacySchema {
    templates: BTreeMap<String, DepartmentBlock>,
}

impl Library {
    /// Load the first candidate file that parses, in the given order.
    ///
    /// Returns `LibraryError::Unavailable` only when every candidate fails;
    /// callers fall back to `Library::empty()` so the dialog can still start
    /// and report "no segments found".
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Library, LibraryError> {
        let mut tried = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let path_display = path.display().to_string();
            let raw = match std::fs::read_to_string(path) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::debug!("Library candidate {} unreadable: {e}", path_display);
                    tried.push(path_display);
                    continue;
                }
            };
            match Library::from_json(&raw) {
                Ok(lib) => {
                    tracing::info!(
                        "Loaded template library from {} ({} segments)",
                        path_display,
                        lib.segment_names().len()
                    );
                    return Ok(lib);
                }
                Err(e) => {
                    tracing::warn!("Library candidate {} failed to parse: {e}", path_display);
                    tried.push(path_display);
                }
            }
        }
        Err(LibraryError::Unavailable { tried })
    }

    /// Parse raw JSON in either schema. Preferred shape is tried first;
    /// there is no merging between shapes or files.
    pub fn from_json(raw: &str) -> Result<Library, LibraryError> {
        if let Ok(preferred) = serde_json::from_str::<PreferredSchema>(raw) {
            let segments = preferred
                .templates_by_segment
                .into_iter()
                .map(|(segment, block)| {
                    let departments = block
                        .setores
                        .into_iter()
                        .map(|(dept, d)| (dept, d.rotinas))
                        .collect();
                    (segment, SegmentCatalog { departments })
                })
                .collect();
            return Ok(Library::new(segments));
        }

        let legacy = serde_json::from_str::<LegacySchema>(raw).map_err(|e| {
            LibraryError::Parse {
                path: "<inline>".to_string(),
                reason: e.to_string(),
            }
        })?;
        let segments = legacy
            .templates
            .into_iter()
            .map(|(segment, block)| {
                let mut departments = BTreeMap::new();
                departments.insert(FALLBACK_DEPARTMENT.to_string(), block.rotinas);
                (segment, SegmentCatalog { departments })
            })
            .collect();
        Ok(Library::new(segments))
    }
}
