//! Selection collection — turning resolved routines into ordered
//! {department, routine, steps} entries.

use serde::{Deserialize, Serialize};

use crate::library::{FALLBACK_DEPARTMENT, Library, Routine, routines_for};

/// One finalized pick. Serde names match the export schema
/// (`setor`, `rotina`, `etapas`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    #[serde(rename = "setor")]
    pub department: String,
    #[serde(rename = "rotina")]
    pub routine: String,
    #[serde(rename = "etapas", default)]
    pub steps: Vec<String>,
}

/// Collect every resolvable routine for the given departments, in the given
/// department order. Departments with no resolvable routines produce no
/// entries. A repeated department name is collected once.
pub fn collect_all(
    library: &Library,
    segment: &str,
    departments: &[String],
) -> Vec<SelectionEntry> {
    let mut out = Vec::new();
    let mut seen = Vec::new();
    for department in departments {
        if seen.contains(&department) {
            continue;
        }
        seen.push(department);
        for routine in routines_for(library, segment, department) {
            out.push(SelectionEntry {
                department: department.clone(),
                routine: routine.name.clone(),
                steps: routine.steps.clone(),
            });
        }
    }
    out
}

/// Collect specific routines by exact name for one department.
///
/// Each requested name is searched first in the department's own routine
/// list, then in the `"Geral"` bucket; the first match wins. A name with no
/// match is silently skipped — accepted policy, it produces no entry rather
/// than an error. Repeated names are collected once.
pub fn collect_chosen(
    library: &Library,
    segment: &str,
    department: &str,
    routine_names: &[String],
) -> Vec<SelectionEntry> {
    let Some(catalog) = library.catalog(segment) else {
        return Vec::new();
    };
    let own: &[Routine] = catalog
        .departments
        .get(department)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let geral: &[Routine] = catalog
        .departments
        .get(FALLBACK_DEPARTMENT)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut out = Vec::new();
    let mut seen = Vec::new();
    for name in routine_names {
        if seen.contains(&name) {
            continue;
        }
        seen.push(name);
        if let Some(routine) = own.iter().chain(geral.iter()).find(|r| &r.name == name) {
            out.push(SelectionEntry {
                department: department.to_string(),
                routine: routine.name.clone(),
                steps: routine.steps.clone(),
            });
        }
    }
    out
}
