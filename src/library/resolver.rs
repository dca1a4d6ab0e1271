//! Sector resolution — which routines apply to a chosen department.

use std::collections::BTreeSet;

use crate::library::model::{Library, Routine};

/// Synthetic department holding generic routines. Legacy libraries place all
/// their routines here; the resolver uses it as a fallback bucket.
pub const FALLBACK_DEPARTMENT: &str = "Geral";

/// Universal department names offered under every segment. A master-list
/// name that has no segment-specific entry resolves to the `"Geral"` bucket.
pub const MASTER_DEPARTMENTS: [&str; 13] = [
    "Recursos Humanos",
    "Compras e Suprimentos",
    "Financeiro/Controladoria",
    "Fiscal/Tributário",
    "Jurídico",
    "Comercial e Vendas",
    "Marketing e Comunicação",
    "Tecnologia da Informação (TI)",
    "Operações/Facilities/Manutenção",
    "Qualidade/Compliance",
    "Logística/Transportes",
    "Segurança do Trabalho/SSMA",
    "Atendimento/CS",
];

/// Routines for a (segment, department) pair.
///
/// Precedence: an explicit department key under the segment wins; otherwise
/// a master-list department name surfaces the segment's `"Geral"` routines
/// when that bucket exists; otherwise empty.
pub fn routines_for<'a>(library: &'a Library, segment: &str, department: &str) -> &'a [Routine] {
    let Some(catalog) = library.catalog(segment) else {
        return &[];
    };
    if let Some(routines) = catalog.departments.get(department) {
        return routines;
    }
    if MASTER_DEPARTMENTS.contains(&department) {
        if let Some(geral) = catalog.departments.get(FALLBACK_DEPARTMENT) {
            return geral;
        }
    }
    &[]
}

/// Sorted, deduplicated union of the segment's explicit department keys and
/// the master list. Deterministic presentation order for the dialog.
pub fn available_departments(library: &Library, segment: &str) -> Vec<String> {
    let mut names: BTreeSet<String> =
        MASTER_DEPARTMENTS.iter().map(|s| s.to_string()).collect();
    if let Some(catalog) = library.catalog(segment) {
        names.extend(catalog.departments.keys().cloned());
    }
    names.into_iter().collect()
}
