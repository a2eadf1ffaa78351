//! Column-identity resolution against the canonical report schema.
//!
//! Header labels have been renamed across publication periods, so resolution
//! runs an ordered list of strategies, each returning a match or nothing:
//! exact alias lookup, case-insensitive keyword substring, then
//! first-remaining-column as the last resort. Columns that are entirely empty
//! or are row-number artifacts are dropped before any strategy runs.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::RankingError;
use crate::parse::RawTable;

/// Known labels for the entity column, current and historical.
pub const ENTITY_ALIASES: &[&str] = &[
    "Instituição financeira",
    "Instituição Financeira",
    "Administradora de consórcio",
    "Administradora de Consórcio",
];

pub const INDEX_ALIASES: &[&str] = &["Índice", "Indice"];

pub const FOUNDED_ALIASES: &[&str] = &[
    "Quantidade de reclamações reguladas procedentes",
    "Qtde de reclamações reguladas procedentes",
];

pub const REGULATED_OTHER_ALIASES: &[&str] = &[
    "Quantidade de reclamações reguladas - outras",
    "Quantidade de reclamações reguladas outras",
    "Qtde de reclamações reguladas - outras",
];

pub const UNREGULATED_ALIASES: &[&str] = &[
    "Quantidade de reclamações não reguladas",
    "Qtde de reclamações não reguladas",
];

pub const TOTAL_ALIASES: &[&str] = &[
    "Quantidade total de reclamações",
    "Qtde total de reclamações",
];

/// Substrings that identify an entity column when no alias matches.
pub const ENTITY_KEYWORDS: &[&str] =
    &["instituição", "administradora", "banco", "financeira", "nome"];

const ARTIFACT_LABELS: &[&str] = &["unnamed: 0", "index", "#"];

static PURE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("static pattern"));

/// A resolved source column: position in the raw table plus its header label.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    pub index: usize,
    pub name: String,
}

/// Mapping from the canonical logical schema to source columns. Only the
/// entity column is guaranteed; every other field is present when the source
/// header carried a recognizable label for it.
#[derive(Debug, Clone)]
pub struct SchemaMap {
    pub entity: ColumnRef,
    pub index: Option<ColumnRef>,
    pub founded: Option<ColumnRef>,
    pub regulated_other: Option<ColumnRef>,
    pub unregulated: Option<ColumnRef>,
    pub total: Option<ColumnRef>,
}

type EntityStrategy = fn(&[(usize, &str)]) -> Option<usize>;

const ENTITY_STRATEGIES: &[(&str, EntityStrategy)] = &[
    ("exact alias", entity_by_alias),
    ("keyword match", entity_by_keyword),
    ("first column", entity_first_column),
];

pub fn resolve_schema(table: &RawTable) -> Result<SchemaMap, RankingError> {
    let kept = kept_columns(table);
    if kept.is_empty() {
        return Err(RankingError::SchemaUnresolved);
    }

    let mut entity = None;
    for (label, strategy) in ENTITY_STRATEGIES {
        if let Some(index) = strategy(&kept) {
            debug!(
                "entity column '{}' resolved via {label}",
                table.headers[index]
            );
            entity = Some(column_ref(table, index));
            break;
        }
    }
    let entity = entity.ok_or(RankingError::SchemaUnresolved)?;

    Ok(SchemaMap {
        index: find_alias(table, &kept, INDEX_ALIASES),
        founded: find_alias(table, &kept, FOUNDED_ALIASES),
        regulated_other: find_alias(table, &kept, REGULATED_OTHER_ALIASES),
        unregulated: find_alias(table, &kept, UNREGULATED_ALIASES),
        total: find_alias(table, &kept, TOTAL_ALIASES),
        entity,
    })
}

/// True when a raw line mentions one of the labels the resolver knows; used
/// by the parser ladder to find a header row buried under preamble.
pub fn mentions_known_header(line: &str) -> bool {
    let lowered = line.to_lowercase();
    ENTITY_ALIASES
        .iter()
        .chain(INDEX_ALIASES)
        .any(|alias| lowered.contains(&alias.to_lowercase()))
}

/// Header positions that survive the artifact filter, with their labels.
fn kept_columns(table: &RawTable) -> Vec<(usize, &str)> {
    (0..table.headers.len())
        .filter(|&index| !is_dropped_column(table, index))
        .map(|index| (index, table.headers[index].as_str()))
        .collect()
}

fn is_dropped_column(table: &RawTable, index: usize) -> bool {
    if table.rows.is_empty() {
        return false;
    }
    if table.column(index).all(|value| value.trim().is_empty()) {
        return true;
    }
    let header = table.headers[index].trim();
    let artifact_label =
        header.is_empty() || ARTIFACT_LABELS.contains(&header.to_lowercase().as_str());
    artifact_label && table.column(index).all(|value| PURE_INTEGER.is_match(value))
}

fn entity_by_alias(columns: &[(usize, &str)]) -> Option<usize> {
    columns
        .iter()
        .find(|(_, name)| ENTITY_ALIASES.contains(name))
        .map(|(index, _)| *index)
}

fn entity_by_keyword(columns: &[(usize, &str)]) -> Option<usize> {
    columns
        .iter()
        .find(|(_, name)| {
            let lowered = name.to_lowercase();
            ENTITY_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
        })
        .map(|(index, _)| *index)
}

fn entity_first_column(columns: &[(usize, &str)]) -> Option<usize> {
    columns.first().map(|(index, _)| *index)
}

fn find_alias(table: &RawTable, kept: &[(usize, &str)], aliases: &[&str]) -> Option<ColumnRef> {
    kept.iter()
        .find(|(_, name)| aliases.contains(name))
        .map(|(index, _)| column_ref(table, *index))
}

fn column_ref(table: &RawTable, index: usize) -> ColumnRef {
    ColumnRef {
        index,
        name: table.headers[index].clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn resolves_consortium_header_and_count_aliases() {
        let raw = table(
            &[
                "Administradora de consórcio",
                "Índice",
                "Quantidade de reclamações reguladas procedentes",
                "Quantidade de reclamações reguladas - outras",
                "Quantidade de reclamações não reguladas",
                "Quantidade total de reclamações",
            ],
            &[&["ABC Consórcios", "5,10", "3", "2", "1", "6"]],
        );
        let map = resolve_schema(&raw).expect("schema");
        assert_eq!(map.entity.index, 0);
        assert_eq!(map.entity.name, "Administradora de consórcio");
        assert_eq!(map.index.as_ref().map(|c| c.index), Some(1));
        assert_eq!(map.founded.as_ref().map(|c| c.index), Some(2));
        assert_eq!(map.regulated_other.as_ref().map(|c| c.index), Some(3));
        assert_eq!(map.unregulated.as_ref().map(|c| c.index), Some(4));
        assert_eq!(map.total.as_ref().map(|c| c.index), Some(5));
    }

    #[test]
    fn falls_back_to_keyword_match() {
        let raw = table(
            &["Posição", "Banco XYZ", "Índice"],
            &[&["1", "Banco Alfa", "2,00"]],
        );
        let map = resolve_schema(&raw).expect("schema");
        assert_eq!(map.entity.name, "Banco XYZ");
    }

    #[test]
    fn falls_back_to_first_column() {
        let raw = table(&["Empresa", "Valor"], &[&["Alfa", "1"]]);
        let map = resolve_schema(&raw).expect("schema");
        assert_eq!(map.entity.index, 0);
        assert_eq!(map.entity.name, "Empresa");
    }

    #[test]
    fn drops_unnamed_row_number_columns() {
        let raw = table(
            &["", "Instituição financeira", "Índice"],
            &[&["0", "Banco A", "1,00"], &["1", "Banco B", "2,00"]],
        );
        let map = resolve_schema(&raw).expect("schema");
        assert_eq!(map.entity.index, 1);
    }

    #[test]
    fn drops_entirely_empty_columns() {
        let raw = table(
            &["Instituição financeira", "Vazio", "Índice"],
            &[&["Banco A", "", "1,00"], &["Banco B", " ", "2,00"]],
        );
        let map = resolve_schema(&raw).expect("schema");
        assert_eq!(map.entity.index, 0);
        assert_eq!(map.index.as_ref().map(|c| c.index), Some(2));
    }

    #[test]
    fn keeps_named_integer_columns() {
        let raw = table(
            &["Instituição financeira", "Quantidade total de reclamações"],
            &[&["Banco A", "10"]],
        );
        let map = resolve_schema(&raw).expect("schema");
        assert!(map.total.is_some());
    }

    #[test]
    fn zero_columns_is_schema_unresolved() {
        let raw = table(&[""], &[&["0"], &["1"]]);
        assert!(matches!(
            resolve_schema(&raw),
            Err(RankingError::SchemaUnresolved)
        ));
    }

    #[test]
    fn header_detection_hits_known_labels() {
        assert!(mentions_known_header("Instituição financeira;Índice"));
        assert!(mentions_known_header("administradora de consórcio;x"));
        assert!(!mentions_known_header("linha de preambulo"));
    }
}
