use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};

use fluxo_assist::config::AssistConfig;
use fluxo_assist::dialog::{
    DialogEngine, DialogInput, ExpectedInput, RoutineChoice, Turn,
};
use fluxo_assist::error::Error;
use fluxo_assist::events::{EventDispatcher, EventSink, WebhookSink};
use fluxo_assist::export;
use fluxo_assist::library::Library;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut config = AssistConfig::default();
    if let Ok(path) = std::env::var("FLUXO_LIBRARY_PATH") {
        config.library_paths = vec![PathBuf::from(path)];
    }
    if let Ok(dir) = std::env::var("FLUXO_EXPORT_DIR") {
        config.export_dir = PathBuf::from(dir);
    }
    config.webhook_url = std::env::var("FLUXO_WEBHOOK_URL").ok();

    // A broken or missing library is not fatal: the dialog starts anyway
    // and reports that no segments were found.
    let library = Library::load(&config.library_paths).unwrap_or_else(|e| {
        tracing::warn!("Starting with an empty library: {e}");
        Library::empty()
    });

    let primary: Option<Box<dyn EventSink>> = config
        .webhook_url
        .clone()
        .map(|url| Box::new(WebhookSink::new(url)) as Box<dyn EventSink>);
    let dispatcher = EventDispatcher::new(primary);

    eprintln!("💬 Fluxo Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Exportação: {}", config.export_dir.display());
    eprintln!("   /reset recomeça, /filtro <texto> filtra segmentos,");
    eprintln!("   /feedback <texto> encerra, /quit sai.\n");

    let engine = DialogEngine::new(library);
    let (mut conversation, turn) = engine.start();
    render(&turn);
    dispatch(&dispatcher, &config, turn).await?;

    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == "/quit" {
            break;
        }
        if let Some(filter) = line.strip_prefix("/filtro") {
            println!("\n{}", filter_reply(engine.library(), filter));
            eprint!("> ");
            continue;
        }

        let input = parse_input(&line, conversation.stage().expected_input());
        match engine.advance(&mut conversation, input) {
            Ok(turn) => {
                render(&turn);
                dispatch(&dispatcher, &config, turn).await?;
            }
            Err(Error::Dialog(e)) => eprintln!("ℹ️  {e}"),
            Err(e) => return Err(e.into()),
        }
        eprint!("> ");
    }
    Ok(())
}

/// Map a raw line to the input kind the current stage expects. Multi-choice
/// stages read a comma-separated list; an empty list means "all".
fn parse_input(line: &str, expected: ExpectedInput) -> DialogInput {
    if line == "/reset" {
        return DialogInput::Reset;
    }
    if let Some(feedback) = line.strip_prefix("/feedback") {
        return DialogInput::Feedback(feedback.trim().to_string());
    }
    match expected {
        ExpectedInput::Departments => DialogInput::Departments(parse_list(line)),
        ExpectedInput::Routines => {
            // One department per line is clumsy in a REPL; accept
            // "Setor: rotina1, rotina2; Setor2: rotina3" on a single line.
            let choices = line
                .split(';')
                .filter_map(|chunk| {
                    let (department, routines) = chunk.split_once(':')?;
                    Some(RoutineChoice {
                        department: department.trim().to_string(),
                        routines: parse_list(routines),
                    })
                })
                .collect();
            DialogInput::Routines(choices)
        }
        _ => DialogInput::Text(line.to_string()),
    }
}

/// Quick segment filter, the REPL counterpart of the filter box the web UI
/// shows while the segment buttons are on screen.
fn filter_reply(library: &Library, filter: &str) -> String {
    let matches = library.filter_segments(filter);
    if matches.is_empty() {
        "(nenhum segmento corresponde ao filtro)".to_string()
    } else {
        format!("[opções: {}]", matches.join(" | "))
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn render(turn: &Turn) {
    for message in &turn.messages {
        println!("\n{message}");
    }
    if !turn.options.is_empty() {
        println!("\n[opções: {}]", turn.options.join(" | "));
    }
    for menu in &turn.routine_options {
        println!("  {}: {}", menu.department, menu.routines.join(", "));
    }
}

/// Deliver the turn's events and write export artifacts when present.
async fn dispatch(
    dispatcher: &EventDispatcher,
    config: &AssistConfig,
    turn: Turn,
) -> anyhow::Result<()> {
    for event in turn.events {
        dispatcher.dispatch(event).await;
    }
    if let Some(bundle) = turn.export {
        for path in export::write_bundle(&bundle, &config.export_dir)? {
            println!("⬇️  {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        Library::from_json(
            r#"{
            "templates_by_segment": {
                "Hospital": { "setores": {} },
                "Imobiliária": { "setores": {} },
                "Tecnologia": { "setores": {} }
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn filtro_command_narrows_the_segment_options() {
        let reply = filter_reply(&library(), " tec ");
        assert_eq!(reply, "[opções: Tecnologia]");
    }

    #[test]
    fn filtro_with_no_match_says_so() {
        let reply = filter_reply(&library(), "banco");
        assert!(reply.contains("nenhum segmento"));
    }

    #[test]
    fn empty_filtro_lists_every_segment() {
        let reply = filter_reply(&library(), "");
        assert_eq!(reply, "[opções: Hospital | Imobiliária | Tecnologia]");
    }
}
