//! Canonical records produced by one pipeline run.

use rust_decimal::Decimal;

use crate::locale::{parse_locale_integer, parse_locale_number};
use crate::parse::RawTable;
use crate::resolve::SchemaMap;

/// Header used for the entity column when the source table could not supply
/// one (empty normalized tables only).
pub const DEFAULT_ENTITY_HEADER: &str = "Instituição";

/// One source row resolved against the canonical schema. Numeric fields keep
/// the absent/zero distinction: a cell that fails coercion is `None`, never a
/// silent zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub entity_name: String,
    pub index_raw: String,
    pub index_value: Option<Decimal>,
    pub complaints_founded: Option<i64>,
    pub complaints_regulated_other: Option<i64>,
    pub complaints_unregulated: Option<i64>,
    pub complaints_total: Option<i64>,
}

/// The numeric fields a ranking can be keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Index,
    Founded,
    RegulatedOther,
    Unregulated,
    Total,
}

impl NumericField {
    pub fn extract(&self, record: &CanonicalRecord) -> Option<Decimal> {
        match self {
            NumericField::Index => record.index_value,
            NumericField::Founded => record.complaints_founded.map(Decimal::from),
            NumericField::RegulatedOther => record.complaints_regulated_other.map(Decimal::from),
            NumericField::Unregulated => record.complaints_unregulated.map(Decimal::from),
            NumericField::Total => record.complaints_total.map(Decimal::from),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NumericField::Index => "Índice",
            NumericField::Founded => "Reguladas Procedentes",
            NumericField::RegulatedOther => "Reguladas Outras",
            NumericField::Unregulated => "Não Reguladas",
            NumericField::Total => "Total",
        }
    }
}

/// All canonical records for one run, in source order.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub entity_header: String,
    pub records: Vec<CanonicalRecord>,
}

impl NormalizedTable {
    pub fn empty() -> Self {
        Self {
            entity_header: DEFAULT_ENTITY_HEADER.to_string(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Builds canonical records from a raw table using a resolved mapping.
    /// Rows whose entity cell is blank are skipped; everything else is kept
    /// even when every numeric cell fails coercion.
    pub fn from_raw(table: &RawTable, map: &SchemaMap) -> Self {
        let records = table
            .rows
            .iter()
            .filter_map(|row| {
                let cell = |index: usize| row.get(index).map(|c| c.as_str()).unwrap_or("");
                let entity_name = cell(map.entity.index).trim().to_string();
                if entity_name.is_empty() {
                    return None;
                }
                let index_raw = map
                    .index
                    .as_ref()
                    .map(|column| cell(column.index).to_string())
                    .unwrap_or_default();
                let integer = |column: &Option<crate::resolve::ColumnRef>| {
                    column
                        .as_ref()
                        .and_then(|column| parse_locale_integer(cell(column.index)))
                };
                Some(CanonicalRecord {
                    index_value: parse_locale_number(&index_raw),
                    complaints_founded: integer(&map.founded),
                    complaints_regulated_other: integer(&map.regulated_other),
                    complaints_unregulated: integer(&map.unregulated),
                    complaints_total: integer(&map.total),
                    entity_name,
                    index_raw,
                })
            })
            .collect();
        Self {
            entity_header: map.entity.name.clone(),
            records,
        }
    }

    /// Case-insensitive entity lookup: exact match first, then substring.
    pub fn find_entity(&self, query: &str) -> Option<&CanonicalRecord> {
        let lowered = query.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| record.entity_name.to_lowercase() == lowered)
            .or_else(|| {
                self.records
                    .iter()
                    .find(|record| record.entity_name.to_lowercase().contains(&lowered))
            })
    }
}
