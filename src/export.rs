//! CSV artifact for a ranked table.
//!
//! The download mirrors the source locale: semicolon field separator, comma
//! decimal separator, every field quoted. Absent numeric values export as
//! empty fields, preserving the absent/zero distinction.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use csv::QuoteStyle;

use crate::rank::RankedEntry;

pub const EXPORT_DELIMITER: u8 = b';';

pub fn write_ranking_csv(
    path: Option<&Path>,
    entity_header: &str,
    entries: &[RankedEntry],
) -> Result<()> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = csv::WriterBuilder::new()
        .delimiter(EXPORT_DELIMITER)
        .quote_style(QuoteStyle::Always)
        .from_writer(sink);

    writer
        .write_record([
            "Rank",
            entity_header,
            "Índice",
            "Reguladas Procedentes",
            "Reguladas Outras",
            "Não Reguladas",
            "Total",
        ])
        .context("Writing CSV header")?;

    for entry in entries {
        let record = &entry.record;
        writer
            .write_record([
                entry.rank_label(),
                record.entity_name.clone(),
                entry.index_display(),
                count_field(record.complaints_founded),
                count_field(record.complaints_regulated_other),
                count_field(record.complaints_unregulated),
                count_field(record.complaints_total),
            ])
            .with_context(|| format!("Writing row for '{}'", record.entity_name))?;
    }
    writer.flush().context("Flushing CSV output")?;
    Ok(())
}

fn count_field(value: Option<i64>) -> String {
    value.map(|count| count.to_string()).unwrap_or_default()
}
