//! Catalog data model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named administrative procedure with ordered steps.
///
/// Serde names match the library file schema (`nome`, `etapas`). A routine
/// missing its name in the source file becomes an empty string rather than
/// being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Ordered instruction strings; position is the sole ordering key.
    #[serde(rename = "etapas", default)]
    pub steps: Vec<String>,
}

/// The departments of one segment, each holding its routines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentCatalog {
    /// Department name → routines, in sorted department order.
    pub departments: BTreeMap<String, Vec<Routine>>,
}

/// The loaded, normalized catalog. Read-only for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Library {
    segments: BTreeMap<String, SegmentCatalog>,
}

impl Library {
    /// An empty library. The dialog still runs against it and reports that
    /// no segments were found.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(segments: BTreeMap<String, SegmentCatalog>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment names in sorted order.
    pub fn segment_names(&self) -> Vec<String> {
        self.segments.keys().cloned().collect()
    }

    pub fn catalog(&self, segment: &str) -> Option<&SegmentCatalog> {
        self.segments.get(segment)
    }

    /// Resolve free text to a known segment: case-insensitive equality or
    /// substring, first match in sorted segment order. Blank input never
    /// matches.
    pub fn match_segment(&self, input: &str) -> Option<&str> {
        let typed = input.trim().to_lowercase();
        if typed.is_empty() {
            return None;
        }
        self.segments
            .keys()
            .find(|s| {
                let lower = s.to_lowercase();
                typed == lower || lower.contains(&typed)
            })
            .map(String::as_str)
    }

    /// Segments whose name contains `filter` (case-insensitive). An empty
    /// filter returns every segment.
    pub fn filter_segments(&self, filter: &str) -> Vec<String> {
        let filter = filter.trim().to_lowercase();
        self.segments
            .keys()
            .filter(|s| filter.is_empty() || s.to_lowercase().contains(&filter))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        let mut segments = BTreeMap::new();
        for name in ["Hospital", "Imobiliária", "Tecnologia"] {
            segments.insert(name.to_string(), SegmentCatalog::default());
        }
        Library::new(segments)
    }

    #[test]
    fn segment_names_are_sorted() {
        assert_eq!(
            library().segment_names(),
            vec!["Hospital", "Imobiliária", "Tecnologia"]
        );
    }

    #[test]
    fn match_segment_by_substring() {
        let lib = library();
        assert_eq!(lib.match_segment("hosp"), Some("Hospital"));
        assert_eq!(lib.match_segment("TECNOLOGIA"), Some("Tecnologia"));
        assert_eq!(lib.match_segment("banco"), None);
    }

    #[test]
    fn match_segment_rejects_blank_input() {
        assert_eq!(library().match_segment("   "), None);
    }

    #[test]
    fn filter_segments_is_case_insensitive() {
        let lib = library();
        assert_eq!(lib.filter_segments("tec"), vec!["Tecnologia"]);
        assert_eq!(lib.filter_segments("").len(), 3);
    }

    #[test]
    fn routine_missing_name_defaults_to_empty() {
        let r: Routine = serde_json::from_str(r#"{"etapas": ["A"]}"#).unwrap();
        assert_eq!(r.name, "");
        assert_eq!(r.steps, vec!["A"]);
    }
}
