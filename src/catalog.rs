//! The upstream catalog of available query-parameter combinations.
//!
//! The endpoint publishes a nested `anos → periodicidades → periodos → tipos`
//! structure; consumers need it flattened into a four-column table of
//! `(tipo, ano, periodicidade, periodo)` rows. Years and periods have been
//! published both as JSON numbers and as strings, so those fields accept
//! either and normalize to text.

use serde::{Deserialize, Deserializer, de};

use crate::error::RankingError;

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub anos: Vec<YearEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YearEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub ano: String,
    pub periodicidades: Vec<PeriodicityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodicityEntry {
    pub periodicidade: String,
    pub periodos: Vec<PeriodEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeriodEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub periodo: String,
    pub tipos: Vec<TypeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeEntry {
    pub tipo: String,
}

/// One flattened selection: everything needed to build a file-endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub tipo: String,
    pub ano: String,
    pub periodicidade: String,
    pub periodo: String,
}

impl Catalog {
    pub fn parse(json: &str) -> Result<Self, RankingError> {
        serde_json::from_str(json).map_err(RankingError::Catalog)
    }

    /// Flattens the nested structure, years outermost and types innermost,
    /// preserving the upstream ordering at every level.
    pub fn flatten(&self) -> Vec<CatalogRow> {
        let mut rows = Vec::new();
        for year in &self.anos {
            for periodicity in &year.periodicidades {
                for period in &periodicity.periodos {
                    for entry in &period.tipos {
                        rows.push(CatalogRow {
                            tipo: entry.tipo.clone(),
                            ano: year.ano.clone(),
                            periodicidade: periodicity.periodicidade.clone(),
                            periodo: period.periodo.clone(),
                        });
                    }
                }
            }
        }
        rows
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
