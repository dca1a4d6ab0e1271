//! The dialog state machine.
//!
//! `advance` consumes exactly one input, performs exactly one stage
//! transition (or stays put on unrecognized input), and returns the
//! assistant messages, shortcut options and stage-completion events for the
//! host to render and deliver. The host owns the [`Conversation`]; the
//! engine holds only the read-only library.

use crate::dialog::collector::{SelectionEntry, collect_all, collect_chosen};
use crate::dialog::conversation::Conversation;
use crate::dialog::prompts;
use crate::dialog::stage::Stage;
use crate::error::{DialogError, Result};
use crate::events::{EventKind, StageEvent};
use crate::export::{self, ExportBundle};
use crate::library::{Library, available_departments, routines_for};

/// One user input, as the host captured it.
#[derive(Debug, Clone)]
pub enum DialogInput {
    /// Free text or a shortcut option clicked as-is.
    Text(String),
    /// Confirmed department multi-choice. Empty means "all available".
    Departments(Vec<String>),
    /// Confirmed per-department routine multi-choice.
    Routines(Vec<RoutineChoice>),
    /// Explicit feedback submission from the result screen.
    Feedback(String),
    /// Explicit restart, valid at any stage.
    Reset,
}

/// Routine names picked for one department.
#[derive(Debug, Clone)]
pub struct RoutineChoice {
    pub department: String,
    pub routines: Vec<String>,
}

/// Routine names offered for one department at the `AskRoutines` stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRoutines {
    pub department: String,
    pub routines: Vec<String>,
}

/// Everything one stage transition produced.
#[derive(Debug, Default)]
pub struct Turn {
    /// Assistant messages, already appended to the transcript.
    pub messages: Vec<String>,
    /// Shortcut options for the next input, if any.
    pub options: Vec<String>,
    /// Per-department routine menu, populated when entering `AskRoutines`.
    pub routine_options: Vec<DepartmentRoutines>,
    /// Stage-completion events for the host to hand to its sink.
    pub events: Vec<StageEvent>,
    /// Rendered artifacts, present when the result stage had a non-empty
    /// selection.
    pub export: Option<ExportBundle>,
}

/// Drives conversations against one loaded library.
pub struct DialogEngine {
    library: Library,
}

impl DialogEngine {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Open a fresh conversation: greeting plus the `inicio` event.
    pub fn start(&self) -> (Conversation, Turn) {
        let conversation = Conversation::new();
        let mut turn = Turn::default();
        turn.messages.push(prompts::GREETING.to_string());
        turn.events.push(StageEvent::capture(
            EventKind::Inicio,
            &conversation.answers,
            &conversation.selection,
        ));
        (conversation, turn)
    }

    /// Advance the conversation by one turn.
    ///
    /// Unrecognized free text never advances the stage; structurally wrong
    /// input (a routine choice where text is expected) is a host bug and
    /// returns an error without touching the conversation.
    pub fn advance(&self, conversation: &mut Conversation, input: DialogInput) -> Result<Turn> {
        if let DialogInput::Reset = input {
            return Ok(self.reset(conversation));
        }
        if conversation.stage().is_terminal() {
            return Err(DialogError::Ended.into());
        }

        match conversation.stage() {
            Stage::AskName => {
                let text = expect_text(conversation, &input)?;
                conversation.push_user(&text);
                conversation.answers.name = text.trim().to_string();
                conversation.set_stage(Stage::AskInstitution);
                let mut turn = Turn::default();
                let reply = prompts::ask_institution(&conversation.answers.name);
                self.say(conversation, &mut turn, reply);
                Ok(turn)
            }

            Stage::AskInstitution => {
                let text = expect_text(conversation, &input)?;
                conversation.push_user(&text);
                conversation.answers.institution = text.trim().to_string();
                conversation.set_stage(Stage::AskBusinessType);
                let mut turn = Turn::default();
                self.say(conversation, &mut turn, prompts::ASK_SEGMENT.to_string());
                if self.library.is_empty() {
                    self.say(conversation, &mut turn, prompts::NO_SEGMENTS.to_string());
                } else {
                    turn.options = self.library.segment_names();
                }
                Ok(turn)
            }

            Stage::AskBusinessType => {
                let text = expect_text(conversation, &input)?;
                conversation.push_user(&text);
                let mut turn = Turn::default();
                if self.library.is_empty() {
                    self.say(conversation, &mut turn, prompts::NO_SEGMENTS.to_string());
                    return Ok(turn);
                }
                match self.library.match_segment(&text) {
                    None => {
                        self.say(
                            conversation,
                            &mut turn,
                            prompts::SEGMENT_NOT_RECOGNIZED.to_string(),
                        );
                        turn.options = self.library.segment_names();
                    }
                    Some(segment) => {
                        conversation.answers.segment = Some(segment.to_string());
                        conversation.set_stage(Stage::AskSectorScope);
                        turn.events.push(StageEvent::capture(
                            EventKind::SegmentoEscolhido,
                            &conversation.answers,
                            &conversation.selection,
                        ));
                        self.say(conversation, &mut turn, prompts::ASK_SECTOR_SCOPE.to_string());
                        turn.options =
                            prompts::SECTOR_SCOPE_OPTIONS.map(str::to_string).to_vec();
                    }
                }
                Ok(turn)
            }

            Stage::AskSectorScope => {
                let text = expect_text(conversation, &input)?;
                conversation.push_user(&text);
                let segment = self.chosen_segment(conversation);
                let mut turn = Turn::default();
                if prompts::matches_trigger(&text, &prompts::TRIGGERS_ALL_SECTORS) {
                    conversation.answers.departments =
                        available_departments(&self.library, &segment);
                    turn.events.push(StageEvent::capture(
                        EventKind::TodosSetores,
                        &conversation.answers,
                        &conversation.selection,
                    ));
                    self.to_routine_scope(conversation, &mut turn);
                } else {
                    conversation.set_stage(Stage::AskSectors);
                    self.say(conversation, &mut turn, prompts::ask_sectors(&segment));
                    turn.options = available_departments(&self.library, &segment);
                }
                Ok(turn)
            }

            Stage::AskSectors => {
                let chosen = match input {
                    DialogInput::Departments(list) => list,
                    _ => {
                        return Err(DialogError::UnexpectedInput {
                            stage: conversation.stage(),
                            expected: "a department multi-choice",
                        }
                        .into());
                    }
                };
                let segment = self.chosen_segment(conversation);
                // Empty confirmation defaults to every available department.
                let departments = if chosen.is_empty() {
                    available_departments(&self.library, &segment)
                } else {
                    dedup_in_order(chosen)
                };
                conversation.push_user(&departments.join(", "));
                conversation.answers.departments = departments;
                let mut turn = Turn::default();
                self.to_routine_scope(conversation, &mut turn);
                Ok(turn)
            }

            Stage::AskRoutineScope => {
                let text = expect_text(conversation, &input)?;
                conversation.push_user(&text);
                let segment = self.chosen_segment(conversation);
                let mut turn = Turn::default();
                if prompts::matches_trigger(&text, &prompts::TRIGGERS_ALL_ROUTINES) {
                    conversation.selection = collect_all(
                        &self.library,
                        &segment,
                        &conversation.answers.departments,
                    );
                    turn.events.push(StageEvent::capture(
                        EventKind::TodasRotinas,
                        &conversation.answers,
                        &conversation.selection,
                    ));
                    self.to_steps(conversation, &mut turn);
                } else {
                    conversation.set_stage(Stage::AskRoutines);
                    self.say(conversation, &mut turn, prompts::ASK_ROUTINES.to_string());
                    turn.routine_options = conversation
                        .answers
                        .departments
                        .iter()
                        .map(|department| DepartmentRoutines {
                            department: department.clone(),
                            routines: routines_for(&self.library, &segment, department)
                                .iter()
                                .map(|r| r.name.clone())
                                .collect(),
                        })
                        .collect();
                }
                Ok(turn)
            }

            Stage::AskRoutines => {
                let choices = match input {
                    DialogInput::Routines(choices) => choices,
                    _ => {
                        return Err(DialogError::UnexpectedInput {
                            stage: conversation.stage(),
                            expected: "a routine multi-choice",
                        }
                        .into());
                    }
                };
                let segment = self.chosen_segment(conversation);
                // The transcript records what the user asked for, even the
                // names that resolve to nothing.
                let requested = choices
                    .iter()
                    .flat_map(|c| c.routines.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(", ");
                conversation.push_user(&requested);
                // Concatenate in confirmed department order, not choice order.
                let mut selection: Vec<SelectionEntry> = Vec::new();
                for department in &conversation.answers.departments {
                    if let Some(choice) =
                        choices.iter().find(|c| &c.department == department)
                    {
                        selection.extend(collect_chosen(
                            &self.library,
                            &segment,
                            department,
                            &choice.routines,
                        ));
                    }
                }
                conversation.selection = selection;
                let mut turn = Turn::default();
                self.to_steps(conversation, &mut turn);
                Ok(turn)
            }

            Stage::AskSteps => {
                let text = expect_text(conversation, &input)?;
                conversation.push_user(&text);
                conversation.answers.include_steps =
                    prompts::matches_trigger(&text, &prompts::TRIGGERS_INCLUDE_STEPS);
                conversation.set_stage(Stage::ShowResult);
                self.show_result(conversation)
            }

            Stage::ShowResult => match input {
                DialogInput::Feedback(text) => {
                    conversation.push_user(&text);
                    conversation.answers.feedback = Some(text);
                    conversation.set_stage(Stage::End);
                    let mut turn = Turn::default();
                    turn.events.push(StageEvent::capture(
                        EventKind::Feedback,
                        &conversation.answers,
                        &conversation.selection,
                    ));
                    self.say(conversation, &mut turn, prompts::THANKS_FEEDBACK.to_string());
                    Ok(turn)
                }
                // Any further free text restarts the whole conversation.
                DialogInput::Text(_) => Ok(self.reset(conversation)),
                _ => Err(DialogError::UnexpectedInput {
                    stage: conversation.stage(),
                    expected: "free text or a feedback submission",
                }
                .into()),
            },

            Stage::End => Err(DialogError::Ended.into()),
        }
    }

    /// Full reset: fresh conversation, greeting, `inicio` event.
    fn reset(&self, conversation: &mut Conversation) -> Turn {
        conversation.reset();
        let mut turn = Turn::default();
        turn.messages.push(prompts::GREETING.to_string());
        turn.events.push(StageEvent::capture(
            EventKind::Inicio,
            &conversation.answers,
            &conversation.selection,
        ));
        turn
    }

    fn show_result(&self, conversation: &mut Conversation) -> Result<Turn> {
        let mut turn = Turn::default();
        turn.events.push(StageEvent::capture(
            EventKind::Resultado,
            &conversation.answers,
            &conversation.selection,
        ));
        if conversation.selection.is_empty() {
            self.say(conversation, &mut turn, prompts::EMPTY_RESULT.to_string());
        } else {
            self.say(conversation, &mut turn, prompts::RESULT_PREAMBLE.to_string());
            let listing = render_listing(
                &conversation.selection,
                conversation.answers.include_steps,
            );
            self.say(conversation, &mut turn, listing);
            turn.export = Some(export::bundle(
                &conversation.selection,
                conversation.answers.include_steps,
                &self.chosen_segment(conversation),
            )?);
            self.say(conversation, &mut turn, prompts::CLOSING_TIP.to_string());
        }
        self.say(conversation, &mut turn, prompts::ASK_FEEDBACK.to_string());
        Ok(turn)
    }

    fn to_routine_scope(&self, conversation: &mut Conversation, turn: &mut Turn) {
        conversation.set_stage(Stage::AskRoutineScope);
        self.say(conversation, turn, prompts::ASK_ROUTINE_SCOPE.to_string());
        turn.options = prompts::ROUTINE_SCOPE_OPTIONS.map(str::to_string).to_vec();
    }

    fn to_steps(&self, conversation: &mut Conversation, turn: &mut Turn) {
        conversation.set_stage(Stage::AskSteps);
        self.say(conversation, turn, prompts::ASK_STEPS.to_string());
        turn.options = prompts::STEP_OPTIONS.map(str::to_string).to_vec();
    }

    fn say(&self, conversation: &mut Conversation, turn: &mut Turn, message: String) {
        conversation.push_assistant(&message);
        turn.messages.push(message);
    }

    /// Segment stored at `AskBusinessType`; stages past it never run
    /// without one, an empty string only appears if the host corrupted
    /// the conversation.
    fn chosen_segment(&self, conversation: &Conversation) -> String {
        conversation.answers.segment.clone().unwrap_or_default()
    }
}

/// Chat-visible result listing, mirroring the export content.
fn render_listing(selection: &[SelectionEntry], include_steps: bool) -> String {
    let mut blocks = Vec::new();
    for entry in selection {
        let mut block = format!(
            "**Setor:** {}\n**Rotina:** {}",
            entry.department, entry.routine
        );
        if include_steps {
            for (i, step) in entry.steps.iter().enumerate() {
                block.push_str(&format!("\n{}. {step}", i + 1));
            }
        }
        blocks.push(block);
    }
    blocks.join("\n---\n")
}

fn expect_text(conversation: &Conversation, input: &DialogInput) -> Result<String> {
    match input {
        DialogInput::Text(t) => Ok(t.clone()),
        _ => Err(DialogError::UnexpectedInput {
            stage: conversation.stage(),
            expected: "free text",
        }
        .into()),
    }
}

fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::library::MASTER_DEPARTMENTS;

    fn engine() -> DialogEngine {
        DialogEngine::new(
            Library::from_json(
                r#"{
                "templates_by_segment": {
                    "Hospital": { "setores": {
                        "Recepção": { "rotinas": [
                            { "nome": "Agendamento", "etapas": ["Abrir agenda", "Confirmar"] }
                        ] },
                        "Geral": { "rotinas": [
                            { "nome": "Protocolo", "etapas": ["Registrar"] }
                        ] }
                    } },
                    "Tecnologia": { "setores": {
                        "Suporte": { "rotinas": [ { "nome": "Chamados", "etapas": [] } ] }
                    } }
                }
            }"#,
            )
            .unwrap(),
        )
    }

    fn text(s: &str) -> DialogInput {
        DialogInput::Text(s.to_string())
    }

    /// Walk a conversation up to the sector-scope question.
    fn up_to_sector_scope(engine: &DialogEngine) -> Conversation {
        let (mut conv, _) = engine.start();
        engine.advance(&mut conv, text("Ana")).unwrap();
        engine.advance(&mut conv, text("Clínica Sul")).unwrap();
        engine.advance(&mut conv, text("hosp")).unwrap();
        assert_eq!(conv.stage(), Stage::AskSectorScope);
        conv
    }

    #[test]
    fn start_greets_and_emits_inicio() {
        let engine = engine();
        let (conv, turn) = engine.start();
        assert_eq!(conv.stage(), Stage::AskName);
        assert_eq!(turn.messages, vec![prompts::GREETING.to_string()]);
        assert_eq!(turn.events.len(), 1);
        assert_eq!(turn.events[0].kind, EventKind::Inicio);
    }

    #[test]
    fn name_and_institution_are_stored_trimmed() {
        let engine = engine();
        let (mut conv, _) = engine.start();
        engine.advance(&mut conv, text("  Ana  ")).unwrap();
        assert_eq!(conv.answers.name, "Ana");
        assert_eq!(conv.stage(), Stage::AskInstitution);

        let turn = engine.advance(&mut conv, text("Clínica Sul")).unwrap();
        assert_eq!(conv.answers.institution, "Clínica Sul");
        assert_eq!(conv.stage(), Stage::AskBusinessType);
        assert_eq!(turn.options, vec!["Hospital", "Tecnologia"]);
    }

    #[test]
    fn segment_resolves_by_substring_and_emits_event() {
        let engine = engine();
        let (mut conv, _) = engine.start();
        engine.advance(&mut conv, text("Ana")).unwrap();
        engine.advance(&mut conv, text("Clínica Sul")).unwrap();

        let turn = engine.advance(&mut conv, text("hosp")).unwrap();
        assert_eq!(conv.answers.segment.as_deref(), Some("Hospital"));
        assert_eq!(conv.stage(), Stage::AskSectorScope);
        assert_eq!(turn.events[0].kind, EventKind::SegmentoEscolhido);
        assert_eq!(turn.events[0].segment, "Hospital");
    }

    #[test]
    fn unrecognized_segment_stays_put() {
        let engine = engine();
        let (mut conv, _) = engine.start();
        engine.advance(&mut conv, text("Ana")).unwrap();
        engine.advance(&mut conv, text("Clínica Sul")).unwrap();

        let turn = engine.advance(&mut conv, text("banco")).unwrap();
        assert_eq!(conv.stage(), Stage::AskBusinessType);
        assert!(turn.events.is_empty());
        assert_eq!(turn.messages, vec![prompts::SEGMENT_NOT_RECOGNIZED]);
        assert_eq!(turn.options, vec!["Hospital", "Tecnologia"]);
    }

    #[test]
    fn all_sectors_shortcut_selects_every_department() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);

        let turn = engine.advance(&mut conv, text("todos os setores")).unwrap();
        assert_eq!(conv.stage(), Stage::AskRoutineScope);
        // master list plus "Recepção" and "Geral"
        assert_eq!(
            conv.answers.departments.len(),
            MASTER_DEPARTMENTS.len() + 2
        );
        assert_eq!(turn.events[0].kind, EventKind::TodosSetores);
    }

    #[test]
    fn other_scope_answer_goes_to_department_choice() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);

        let turn = engine.advance(&mut conv, text("apenas alguns")).unwrap();
        assert_eq!(conv.stage(), Stage::AskSectors);
        assert!(turn.options.contains(&"Recepção".to_string()));
    }

    #[test]
    fn empty_department_choice_defaults_to_all_available() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("escolher")).unwrap();

        engine
            .advance(&mut conv, DialogInput::Departments(vec![]))
            .unwrap();
        assert_eq!(conv.stage(), Stage::AskRoutineScope);
        assert_eq!(
            conv.answers.departments.len(),
            MASTER_DEPARTMENTS.len() + 2
        );
    }

    #[test]
    fn confirmed_departments_are_stored_verbatim_deduplicated() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("escolher")).unwrap();

        engine
            .advance(
                &mut conv,
                DialogInput::Departments(vec![
                    "Recepção".to_string(),
                    "Recursos Humanos".to_string(),
                    "Recepção".to_string(),
                ]),
            )
            .unwrap();
        assert_eq!(conv.answers.departments, vec!["Recepção", "Recursos Humanos"]);
    }

    #[test]
    fn all_routines_collects_in_department_order() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("escolher")).unwrap();
        engine
            .advance(
                &mut conv,
                DialogInput::Departments(vec![
                    "Recursos Humanos".to_string(),
                    "Recepção".to_string(),
                ]),
            )
            .unwrap();

        let turn = engine.advance(&mut conv, text("todas as rotinas")).unwrap();
        assert_eq!(conv.stage(), Stage::AskSteps);
        assert_eq!(turn.events[0].kind, EventKind::TodasRotinas);
        // RH falls back to Geral's "Protocolo", then Recepção's own routine
        assert_eq!(conv.selection.len(), 2);
        assert_eq!(conv.selection[0].department, "Recursos Humanos");
        assert_eq!(conv.selection[0].routine, "Protocolo");
        assert_eq!(conv.selection[1].routine, "Agendamento");
    }

    #[test]
    fn specific_routines_are_offered_per_department() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("escolher")).unwrap();
        engine
            .advance(
                &mut conv,
                DialogInput::Departments(vec!["Recepção".to_string()]),
            )
            .unwrap();

        let turn = engine.advance(&mut conv, text("selecionar rotinas")).unwrap();
        assert_eq!(conv.stage(), Stage::AskRoutines);
        assert_eq!(
            turn.routine_options,
            vec![DepartmentRoutines {
                department: "Recepção".to_string(),
                routines: vec!["Agendamento".to_string()],
            }]
        );

        engine
            .advance(
                &mut conv,
                DialogInput::Routines(vec![RoutineChoice {
                    department: "Recepção".to_string(),
                    routines: vec!["Agendamento".to_string()],
                }]),
            )
            .unwrap();
        assert_eq!(conv.stage(), Stage::AskSteps);
        assert_eq!(conv.selection.len(), 1);
        assert_eq!(conv.selection[0].steps, vec!["Abrir agenda", "Confirmar"]);
    }

    #[test]
    fn transcript_records_requested_routines_verbatim() {
        use crate::dialog::conversation::Role;

        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("escolher")).unwrap();
        engine
            .advance(
                &mut conv,
                DialogInput::Departments(vec!["Recepção".to_string()]),
            )
            .unwrap();
        engine.advance(&mut conv, text("selecionar rotinas")).unwrap();

        engine
            .advance(
                &mut conv,
                DialogInput::Routines(vec![RoutineChoice {
                    department: "Recepção".to_string(),
                    routines: vec!["Agendamento".to_string(), "Inexistente".to_string()],
                }]),
            )
            .unwrap();

        // "Inexistente" produced no selection entry but stays on record
        assert_eq!(conv.selection.len(), 1);
        let last_user = conv
            .transcript
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .unwrap();
        assert_eq!(last_user.content, "Agendamento, Inexistente");
    }

    #[test]
    fn steps_refusal_sets_flag_false_and_shows_result() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("todos")).unwrap();
        engine.advance(&mut conv, text("todas")).unwrap();

        let turn = engine
            .advance(&mut conv, text("não, apenas a lista"))
            .unwrap();
        assert_eq!(conv.stage(), Stage::ShowResult);
        assert!(!conv.answers.include_steps);
        assert_eq!(turn.events[0].kind, EventKind::Resultado);
        let bundle = turn.export.expect("non-empty selection exports");
        assert!(bundle.csv.starts_with("Segmento,Setor,Rotina,Etapa (ordem)"));
        assert!(bundle.markdown.starts_with("# Templates gerados — Hospital"));
    }

    #[test]
    fn steps_acceptance_sets_flag_true() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("todos")).unwrap();
        engine.advance(&mut conv, text("todas")).unwrap();

        let turn = engine
            .advance(&mut conv, text("Sim, incluir etapas"))
            .unwrap();
        assert!(conv.answers.include_steps);
        let bundle = turn.export.unwrap();
        assert!(bundle.csv.contains("1. Abrir agenda"));
    }

    #[test]
    fn empty_selection_reports_nothing_found_without_artifacts() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("escolher")).unwrap();
        // Suporte belongs to Tecnologia; under Hospital it resolves to nothing
        engine
            .advance(
                &mut conv,
                DialogInput::Departments(vec!["Suporte".to_string()]),
            )
            .unwrap();
        engine.advance(&mut conv, text("todas")).unwrap();

        let turn = engine.advance(&mut conv, text("sim")).unwrap();
        assert_eq!(conv.stage(), Stage::ShowResult);
        assert!(turn.export.is_none());
        assert!(turn.messages.contains(&prompts::EMPTY_RESULT.to_string()));
    }

    #[test]
    fn free_text_at_result_resets_the_conversation() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("todos")).unwrap();
        engine.advance(&mut conv, text("todas")).unwrap();
        engine.advance(&mut conv, text("sim")).unwrap();

        let turn = engine.advance(&mut conv, text("obrigado!")).unwrap();
        assert_eq!(conv.stage(), Stage::AskName);
        assert!(conv.answers.name.is_empty());
        assert_eq!(turn.events[0].kind, EventKind::Inicio);
    }

    #[test]
    fn feedback_ends_the_conversation() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        engine.advance(&mut conv, text("todos")).unwrap();
        engine.advance(&mut conv, text("todas")).unwrap();
        engine.advance(&mut conv, text("sim")).unwrap();

        let turn = engine
            .advance(&mut conv, DialogInput::Feedback("Muito útil".to_string()))
            .unwrap();
        assert_eq!(conv.stage(), Stage::End);
        assert_eq!(turn.events[0].kind, EventKind::Feedback);
        assert_eq!(turn.events[0].feedback, "Muito útil");

        let err = engine.advance(&mut conv, text("oi")).unwrap_err();
        assert!(matches!(err, Error::Dialog(DialogError::Ended)));
    }

    #[test]
    fn reset_works_from_any_stage() {
        let engine = engine();
        let mut conv = up_to_sector_scope(&engine);
        let turn = engine.advance(&mut conv, DialogInput::Reset).unwrap();
        assert_eq!(conv.stage(), Stage::AskName);
        assert_eq!(turn.events[0].kind, EventKind::Inicio);
    }

    #[test]
    fn wrong_input_kind_is_an_error_and_does_not_advance() {
        let engine = engine();
        let (mut conv, _) = engine.start();
        let err = engine
            .advance(&mut conv, DialogInput::Departments(vec![]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Dialog(DialogError::UnexpectedInput { .. })
        ));
        assert_eq!(conv.stage(), Stage::AskName);
    }

    #[test]
    fn empty_library_reports_no_segments_and_never_advances() {
        let engine = DialogEngine::new(Library::empty());
        let (mut conv, _) = engine.start();
        engine.advance(&mut conv, text("Ana")).unwrap();
        let turn = engine.advance(&mut conv, text("ACME")).unwrap();
        assert!(turn.messages.contains(&prompts::NO_SEGMENTS.to_string()));
        assert!(turn.options.is_empty());

        let turn = engine.advance(&mut conv, text("Hospital")).unwrap();
        assert_eq!(conv.stage(), Stage::AskBusinessType);
        assert_eq!(turn.messages, vec![prompts::NO_SEGMENTS]);
    }
}
