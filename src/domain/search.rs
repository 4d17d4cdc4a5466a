//! Local filtering over the last full fetch.
//!
//! Filters always read the unfiltered snapshot, never the current view, so
//! narrowing twice in a row does not compound. Matching is a case-insensitive
//! substring test; a blank query is the identity.

use crate::domain::cliente::{ClienteRecord, TipoDocumento};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// `nombre apellido`
    ByName,
    /// `numero_documento`, any document type
    ByDocumentNumber,
    /// `numero_documento` among DNI holders only
    ByDni,
    /// `numero_documento` among RUC holders only
    ByRuc,
}

impl SearchStrategy {
    pub fn matches(self, record: &ClienteRecord, needle: &str) -> bool {
        match self {
            SearchStrategy::ByName => contains_ignore_case(&record.full_name(), needle),
            SearchStrategy::ByDocumentNumber => {
                contains_ignore_case(&record.numero_documento, needle)
            }
            SearchStrategy::ByDni => {
                record.tipo_documento.mentions(TipoDocumento::Dni.as_str())
                    && contains_ignore_case(&record.numero_documento, needle)
            }
            SearchStrategy::ByRuc => {
                record.tipo_documento.mentions(TipoDocumento::Ruc.as_str())
                    && contains_ignore_case(&record.numero_documento, needle)
            }
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nombre" | "name" => Ok(SearchStrategy::ByName),
            "documento" | "document" => Ok(SearchStrategy::ByDocumentNumber),
            "dni" => Ok(SearchStrategy::ByDni),
            "ruc" => Ok(SearchStrategy::ByRuc),
            other => Err(format!(
                "unknown search strategy '{}' (expected nombre, documento, dni or ruc)",
                other
            )),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchStrategy::ByName => "nombre",
            SearchStrategy::ByDocumentNumber => "documento",
            SearchStrategy::ByDni => "dni",
            SearchStrategy::ByRuc => "ruc",
        };
        f.write_str(s)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns the records of `snapshot` matching `query`, in snapshot order.
///
/// The query is trimmed first; a blank query returns the whole snapshot.
pub fn local_filter(
    snapshot: &[ClienteRecord],
    query: &str,
    strategy: SearchStrategy,
) -> Vec<ClienteRecord> {
    let needle = query.trim();
    if needle.is_empty() {
        return snapshot.to_vec();
    }
    snapshot
        .iter()
        .filter(|record| strategy.matches(record, needle))
        .cloned()
        .collect()
}
