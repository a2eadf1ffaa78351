//! Deterministic ranking of a normalized table.

use rust_decimal::Decimal;

use crate::locale::format_locale_opt;
use crate::record::{CanonicalRecord, NormalizedTable, NumericField};

pub const DEFAULT_TOP_N: usize = 30;

/// A canonical record plus its 1-based position in the ranking.
#[derive(Debug, Clone)]
pub struct RankedEntry {
    pub rank: usize,
    pub record: CanonicalRecord,
}

impl RankedEntry {
    /// Ordinal label in the form the source publishes: `1º`, `2º`, …
    pub fn rank_label(&self) -> String {
        format!("{}º", self.rank)
    }

    pub fn index_display(&self) -> String {
        format_locale_opt(self.record.index_value)
    }
}

/// Ranking output: entries with a value for the designated field, ordered
/// descending with ranks assigned, followed by the value-less remainder in
/// original order.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub ranked: Vec<RankedEntry>,
    pub unranked: Vec<CanonicalRecord>,
}

impl Ranking {
    /// Bounded projection over the ranked entries only. Never pads.
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        &self.ranked[..n.min(self.ranked.len())]
    }
}

pub fn rank_by(table: &NormalizedTable, field: NumericField) -> Ranking {
    let mut present: Vec<(&CanonicalRecord, Decimal)> = Vec::new();
    let mut unranked = Vec::new();
    for record in &table.records {
        match field.extract(record) {
            Some(value) => present.push((record, value)),
            None => unranked.push(record.clone()),
        }
    }
    // Stable sort: ties keep original row order.
    present.sort_by(|a, b| b.1.cmp(&a.1));

    let ranked = present
        .into_iter()
        .enumerate()
        .map(|(position, (record, _))| RankedEntry {
            rank: position + 1,
            record: record.clone(),
        })
        .collect();
    Ranking { ranked, unranked }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, index: Option<&str>) -> CanonicalRecord {
        CanonicalRecord {
            entity_name: name.to_string(),
            index_raw: index.unwrap_or_default().to_string(),
            index_value: index.map(|raw| raw.parse().expect("decimal literal")),
            complaints_founded: None,
            complaints_regulated_other: None,
            complaints_unregulated: None,
            complaints_total: None,
        }
    }

    fn table(records: Vec<CanonicalRecord>) -> NormalizedTable {
        NormalizedTable {
            entity_header: "Instituição financeira".to_string(),
            records,
        }
    }

    #[test]
    fn orders_descending_with_dense_ranks() {
        let ranking = rank_by(
            &table(vec![
                record("low", Some("1.5")),
                record("high", Some("9.0")),
                record("mid", Some("4.25")),
            ]),
            NumericField::Index,
        );
        let names: Vec<&str> = ranking
            .ranked
            .iter()
            .map(|e| e.record.entity_name.as_str())
            .collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        let ranks: Vec<usize> = ranking.ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ties_keep_original_order() {
        let ranking = rank_by(
            &table(vec![
                record("first", Some("2.0")),
                record("second", Some("2.0")),
                record("third", Some("2.0")),
            ]),
            NumericField::Index,
        );
        let names: Vec<&str> = ranking
            .ranked
            .iter()
            .map(|e| e.record.entity_name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn absent_values_trail_in_original_order_and_are_unranked() {
        let ranking = rank_by(
            &table(vec![
                record("no-index-a", None),
                record("ranked", Some("1.0")),
                record("no-index-b", None),
            ]),
            NumericField::Index,
        );
        assert_eq!(ranking.ranked.len(), 1);
        let trailing: Vec<&str> = ranking
            .unranked
            .iter()
            .map(|r| r.entity_name.as_str())
            .collect();
        assert_eq!(trailing, vec!["no-index-a", "no-index-b"]);
    }

    #[test]
    fn top_projection_never_pads() {
        let records: Vec<CanonicalRecord> = (0..10)
            .map(|i| record(&format!("e{i}"), Some("1.0")))
            .collect();
        let ranking = rank_by(&table(records), NumericField::Index);
        assert_eq!(ranking.top(DEFAULT_TOP_N).len(), 10);
        assert_eq!(ranking.top(3).len(), 3);
    }

    #[test]
    fn rank_labels_are_ordinal() {
        let ranking = rank_by(&table(vec![record("only", Some("1.0"))]), NumericField::Index);
        assert_eq!(ranking.ranked[0].rank_label(), "1º");
        assert_eq!(ranking.ranked[0].index_display(), "1,00");
    }

    #[test]
    fn ranking_by_a_count_field_uses_that_field() {
        let mut a = record("a", Some("1.0"));
        a.complaints_total = Some(5);
        let mut b = record("b", Some("9.0"));
        b.complaints_total = Some(50);
        let ranking = rank_by(&table(vec![a, b]), NumericField::Total);
        assert_eq!(ranking.ranked[0].record.entity_name, "b");
    }
}
