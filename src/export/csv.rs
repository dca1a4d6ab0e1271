//! Tabular export.

use crate::dialog::SelectionEntry;

pub const HEADER: &str = "Segmento,Setor,Rotina,Etapa (ordem)";

/// Render the selection as UTF-8 CSV.
///
/// One row per entry when `include_steps` is off or the entry has no
/// steps; otherwise one row per step, labeled `N. step text`.
pub fn render(selection: &[SelectionEntry], include_steps: bool, segment: &str) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for entry in selection {
        if include_steps && !entry.steps.is_empty() {
            for (i, step) in entry.steps.iter().enumerate() {
                push_row(
                    &mut out,
                    segment,
                    entry,
                    &format!("{}. {step}", i + 1),
                );
            }
        } else {
            push_row(&mut out, segment, entry, "");
        }
    }
    out
}

fn push_row(out: &mut String, segment: &str, entry: &SelectionEntry, step: &str) {
    let row = [segment, &entry.department, &entry.routine, step]
        .map(escape_field)
        .join(",");
    out.push_str(&row);
    out.push('\n');
}

/// Quote a field when it contains a comma, quote or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(department: &str, routine: &str, steps: &[&str]) -> SelectionEntry {
        SelectionEntry {
            department: department.to_string(),
            routine: routine.to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn one_row_per_step_with_order_labels() {
        let selection = vec![entry("RH", "Admissão", &["Enviar docs", "Assinar contrato"])];
        let csv = render(&selection, true, "Hospital");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "Hospital,RH,Admissão,1. Enviar docs");
        assert_eq!(lines[2], "Hospital,RH,Admissão,2. Assinar contrato");
    }

    #[test]
    fn one_row_per_entry_without_steps() {
        let selection = vec![
            entry("RH", "Admissão", &["Enviar docs"]),
            entry("Geral", "Protocolo", &[]),
        ];
        let csv = render(&selection, false, "Hospital");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Hospital,RH,Admissão,");
        assert_eq!(lines[2], "Hospital,Geral,Protocolo,");
    }

    #[test]
    fn entry_with_no_steps_still_gets_a_row_when_steps_are_on() {
        let selection = vec![entry("Geral", "Protocolo", &[])];
        let csv = render(&selection, true, "Hospital");
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.ends_with("Hospital,Geral,Protocolo,\n"));
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let selection = vec![entry(
            "Compras, Suprimentos",
            "Cotação \"rápida\"",
            &[],
        )];
        let csv = render(&selection, false, "Hospital");
        assert!(csv.contains("\"Compras, Suprimentos\""));
        assert!(csv.contains("\"Cotação \"\"rápida\"\"\""));
    }
}
