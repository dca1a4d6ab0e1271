//! Conversation stages.

use serde::{Deserialize, Serialize};

/// The stages of the guided dialog.
///
/// Progresses forward only: AskName → AskInstitution → AskBusinessType →
/// AskSectorScope → (AskSectors) → AskRoutineScope → (AskRoutines) →
/// AskSteps → ShowResult → End. The only way back is a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AskName,
    AskInstitution,
    AskBusinessType,
    AskSectorScope,
    AskSectors,
    AskRoutineScope,
    AskRoutines,
    AskSteps,
    ShowResult,
    End,
}

/// What kind of input a stage consumes. Hosts use this to decide which
/// widget to render; the engine uses it in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedInput {
    /// Free text (or one of the offered shortcut options as text).
    Text,
    /// A confirmed multi-choice of department names.
    Departments,
    /// A confirmed per-department multi-choice of routine names.
    Routines,
    /// Free text (resets) or an explicit feedback submission.
    TextOrFeedback,
    /// Nothing but an explicit reset.
    ResetOnly,
}

impl Stage {
    pub fn expected_input(&self) -> ExpectedInput {
        match self {
            Stage::AskSectors => ExpectedInput::Departments,
            Stage::AskRoutines => ExpectedInput::Routines,
            Stage::ShowResult => ExpectedInput::TextOrFeedback,
            Stage::End => ExpectedInput::ResetOnly,
            _ => ExpectedInput::Text,
        }
    }

    /// Whether this stage accepts no further transitions except reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::AskName
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AskName => "ask_name",
            Self::AskInstitution => "ask_institution",
            Self::AskBusinessType => "ask_business_type",
            Self::AskSectorScope => "ask_sector_scope",
            Self::AskSectors => "ask_sectors",
            Self::AskRoutineScope => "ask_routine_scope",
            Self::AskRoutines => "ask_routines",
            Self::AskSteps => "ask_steps",
            Self::ShowResult => "show_result",
            Self::End => "end",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde() {
        let stages = [
            Stage::AskName,
            Stage::AskInstitution,
            Stage::AskBusinessType,
            Stage::AskSectorScope,
            Stage::AskSectors,
            Stage::AskRoutineScope,
            Stage::AskRoutines,
            Stage::AskSteps,
            Stage::ShowResult,
            Stage::End,
        ];
        for stage in stages {
            let display = format!("{stage}");
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn only_end_is_terminal() {
        assert!(Stage::End.is_terminal());
        assert!(!Stage::ShowResult.is_terminal());
        assert!(!Stage::AskName.is_terminal());
    }

    #[test]
    fn expected_inputs() {
        assert_eq!(Stage::AskName.expected_input(), ExpectedInput::Text);
        assert_eq!(Stage::AskSectors.expected_input(), ExpectedInput::Departments);
        assert_eq!(Stage::AskRoutines.expected_input(), ExpectedInput::Routines);
        assert_eq!(
            Stage::ShowResult.expected_input(),
            ExpectedInput::TextOrFeedback
        );
        assert_eq!(Stage::End.expected_input(), ExpectedInput::ResetOnly);
    }
}
