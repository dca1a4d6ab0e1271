//! Export renderers — pure functions from a finished selection to CSV,
//! JSON and Markdown artifacts.

pub mod csv;
pub mod json;
pub mod markdown;

use std::path::{Path, PathBuf};

use crate::dialog::SelectionEntry;
use crate::error::ExportError;

pub use json::ExportDocument;

pub const CSV_FILE_NAME: &str = "fluxos_exportados.csv";
pub const JSON_FILE_NAME: &str = "fluxos_exportados.json";
pub const MARKDOWN_FILE_NAME: &str = "fluxos_exportados.md";

/// All three rendered artifacts for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub csv: String,
    pub json: String,
    pub markdown: String,
}

/// Render every format at once. Callers must not invoke this with an empty
/// selection; the dialog reports "nothing found" instead of producing
/// empty artifacts.
pub fn bundle(
    selection: &[SelectionEntry],
    include_steps: bool,
    segment: &str,
) -> Result<ExportBundle, ExportError> {
    Ok(ExportBundle {
        csv: csv::render(selection, include_steps, segment),
        json: json::render(selection, include_steps, segment)?,
        markdown: markdown::render(selection, include_steps, segment),
    })
}

/// Write all three artifacts under `dir`, creating the directory if needed.
/// Returns the written paths in CSV, JSON, Markdown order.
pub fn write_bundle(bundle: &ExportBundle, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;
    let files = [
        (CSV_FILE_NAME, &bundle.csv),
        (JSON_FILE_NAME, &bundle.json),
        (MARKDOWN_FILE_NAME, &bundle.markdown),
    ];
    let mut paths = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        std::fs::write(&path, content)?;
        paths.push(path);
    }
    Ok(paths)
}
