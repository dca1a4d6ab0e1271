//! Configuration types.

use std::path::PathBuf;

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Candidate library files, in descending schema-version order.
    /// The first file that parses wins; later files are never merged in.
    pub library_paths: Vec<PathBuf>,
    /// Directory where export artifacts are written.
    pub export_dir: PathBuf,
    /// Optional webhook URL for stage-completion events. When unset (or when
    /// delivery fails) events land in the local buffer instead.
    pub webhook_url: Option<String>,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            library_paths: vec![
                PathBuf::from("data/1doc_flow_templates_v3.json"),
                PathBuf::from("data/1doc_flow_templates.json"),
            ],
            export_dir: PathBuf::from("./export"),
            webhook_url: None,
        }
    }
}
