//! Formatted Markdown export.

use std::collections::BTreeMap;

use crate::dialog::SelectionEntry;

/// Fixed help section appended to every document.
const HELP_FOOTER: &str = "\
## Como usar

1. Crie um fluxo na 1Doc para cada rotina listada acima.
2. Defina os setores responsáveis por cada etapa.
3. Consulte a documentação: <https://ajuda.1doc.com.br>
";

/// Render the selection as a Markdown document: departments grouped
/// alphabetically and numbered `1`, routines `1.1`, steps listed under
/// each routine when `include_steps` is on.
pub fn render(selection: &[SelectionEntry], include_steps: bool, segment: &str) -> String {
    let mut by_department: BTreeMap<&str, Vec<&SelectionEntry>> = BTreeMap::new();
    for entry in selection {
        by_department
            .entry(entry.department.as_str())
            .or_default()
            .push(entry);
    }

    let mut out = format!("# Templates gerados — {segment}\n");
    for (dept_idx, (department, entries)) in by_department.iter().enumerate() {
        let d = dept_idx + 1;
        out.push_str(&format!("\n## {d}. {department}\n"));
        for (routine_idx, entry) in entries.iter().enumerate() {
            let r = routine_idx + 1;
            out.push_str(&format!("\n### {d}.{r} {}\n", entry.routine));
            if include_steps && !entry.steps.is_empty() {
                for (i, step) in entry.steps.iter().enumerate() {
                    out.push_str(&format!("{}. {step}\n", i + 1));
                }
            }
        }
    }
    out.push('\n');
    out.push_str(HELP_FOOTER);
    out
}
