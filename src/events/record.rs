//! The flat event record sent to analytics sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dialog::{Answers, SelectionEntry};

/// Which stage completion the event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Inicio,
    SegmentoEscolhido,
    TodosSetores,
    TodasRotinas,
    Resultado,
    Feedback,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Inicio => "inicio",
            Self::SegmentoEscolhido => "segmento_escolhido",
            Self::TodosSetores => "todos_setores",
            Self::TodasRotinas => "todas_rotinas",
            Self::Resultado => "resultado",
            Self::Feedback => "feedback",
        };
        write!(f, "{s}")
    }
}

/// Flat record shape expected by the spreadsheet-style sink. One row per
/// event; list fields arrive pre-joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "evento")]
    pub kind: EventKind,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
    #[serde(rename = "segmento")]
    pub segment: String,
    /// Chosen department names, comma-joined.
    #[serde(rename = "setores")]
    pub departments: String,
    /// Selected routine names, comma-joined.
    #[serde(rename = "rotinas")]
    pub routines: String,
    pub feedback: String,
    #[serde(rename = "comentario")]
    pub comment: String,
}

impl StageEvent {
    /// Snapshot the conversation's answers and selection into a record.
    pub fn capture(kind: EventKind, answers: &Answers, selection: &[SelectionEntry]) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            name: answers.name.clone(),
            institution: answers.institution.clone(),
            segment: answers.segment.clone().unwrap_or_default(),
            departments: answers.departments.join(", "),
            routines: selection
                .iter()
                .map(|e| e.routine.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            feedback: answers.feedback.clone().unwrap_or_default(),
            comment: String::new(),
        }
    }
}
