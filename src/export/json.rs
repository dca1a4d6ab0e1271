//! Structured export.

use serde::{Deserialize, Serialize};

use crate::dialog::SelectionEntry;
use crate::error::ExportError;

/// Top-level JSON document. Unlike the tabular and Markdown renderers this
/// format is structural: steps are always retained, whatever the
/// `incluir_etapas` flag says about display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "selecoes")]
    pub selections: Vec<SelectionEntry>,
    #[serde(rename = "segmento")]
    pub segment: String,
    #[serde(rename = "incluir_etapas")]
    pub include_steps: bool,
}

/// Render the selection as pretty-printed UTF-8 JSON.
pub fn render(
    selection: &[SelectionEntry],
    include_steps: bool,
    segment: &str,
) -> Result<String, ExportError> {
    let doc = ExportDocument {
        selections: selection.to_vec(),
        segment: segment.to_string(),
        include_steps,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse a document previously produced by [`render`].
pub fn parse(raw: &str) -> Result<ExportDocument, ExportError> {
    Ok(serde_json::from_str(raw)?)
}
