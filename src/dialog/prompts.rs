//! Assistant copy and the keyword-trigger tables, per stage.
//!
//! The trigger tables are a deliberate policy: intent is detected by
//! case-insensitive substring ("todos" anywhere in the reply selects every
//! department), not strict equality. Tightening this would change accepted
//! behavior, so the tables stay small and visible here.

pub const GREETING: &str =
    "Oi! Sou o assistente de **gerador de templates** da 1Doc. Qual é o seu **nome**?";

pub fn ask_institution(name: &str) -> String {
    format!("Prazer, {name}! Qual é o **nome da instituição**?")
}

pub const ASK_SEGMENT: &str =
    "Certo. Agora me diga o **segmento** da instituição (ex.: Hospital, Tecnologia, Imobiliária).";

pub const SEGMENT_NOT_RECOGNIZED: &str =
    "Não reconheci esse segmento. Use uma das opções ou digite novamente.";

pub const NO_SEGMENTS: &str =
    "Não encontrei nenhum segmento na biblioteca de templates. Verifique o arquivo de \
     templates e recomece a conversa.";

pub const ASK_SECTOR_SCOPE: &str =
    "Você quer **visualizar templates para todos setores da sua empresa** ou **apenas alguns**?";

pub fn ask_sectors(segment: &str) -> String {
    format!("Selecione os **setores** para o segmento **{segment}**:")
}

pub const ASK_ROUTINE_SCOPE: &str =
    "Perfeito. Quer ver **todas as sugestões de rotinas administrativas** para os setores \
     escolhidos ou **selecionar rotinas específicas**?";

pub const ASK_ROUTINES: &str = "Selecione as **rotinas** (por setor):";

pub const ASK_STEPS: &str = "Deseja que eu **inclua as etapas** para essas rotinas?";

pub const RESULT_PREAMBLE: &str = "Perfeito! Aqui está **o que recomendo**:";

pub const EMPTY_RESULT: &str = "Não encontrei rotinas para o que você selecionou.";

pub const CLOSING_TIP: &str =
    "Dica: defina os **setores responsáveis** por etapa direto na 1Doc.";

pub const ASK_FEEDBACK: &str =
    "Se quiser, deixe um **feedback** sobre as sugestões — ou envie qualquer mensagem \
     para recomeçar.";

pub const THANKS_FEEDBACK: &str =
    "Obrigado pelo feedback! Para gerar novos templates, recomece a conversa.";

/// Shortcut options per stage, rendered by the host as buttons.
pub const SECTOR_SCOPE_OPTIONS: [&str; 2] = ["Todos os setores", "Escolher setores"];
pub const ROUTINE_SCOPE_OPTIONS: [&str; 2] = ["Todas as rotinas", "Selecionar rotinas"];
pub const STEP_OPTIONS: [&str; 2] = ["Sim, incluir etapas", "Não, apenas a lista de rotinas"];

/// "All departments" trigger at the sector-scope stage.
pub const TRIGGERS_ALL_SECTORS: [&str; 1] = ["todos"];
/// "All routines" trigger at the routine-scope stage.
pub const TRIGGERS_ALL_ROUTINES: [&str; 1] = ["todas"];
/// Include-steps triggers; anything else means steps off.
pub const TRIGGERS_INCLUDE_STEPS: [&str; 3] = ["sim", "incluir", "etapa"];

/// Case-insensitive substring check against a trigger table.
pub fn matches_trigger(input: &str, triggers: &[&str]) -> bool {
    let input = input.trim().to_lowercase();
    triggers.iter().any(|t| input.contains(t))
}
