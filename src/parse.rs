//! Tolerant tabular parsing of a decoded report.
//!
//! The parser runs a fixed ladder of strategies, each attempted only when the
//! previous one fails to produce a plausible table:
//!
//! 1. parse with the sniffed delimiter, all cells as raw strings;
//! 2. if that yields a single column, retry the remaining candidate
//!    delimiters and accept the first multi-column result;
//! 3. scan raw lines for one that contains the default delimiter plus a known
//!    header label and re-parse from there;
//! 4. give up and return an explicitly empty table.
//!
//! An empty table means "no data for this query"; the ladder never errors.

use log::warn;

use crate::{delimiter, resolve};

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|cell| cell.as_str()).unwrap_or(""))
    }
}

pub fn parse_table(text: &str, resolved_delimiter: u8) -> RawTable {
    if let Some(table) = parse_attempt(text, resolved_delimiter)
        && table.headers.len() > 1
    {
        return table;
    }
    warn!(
        "delimiter '{}' produced a single column; retrying remaining candidates",
        delimiter::printable(resolved_delimiter)
    );

    for candidate in delimiter::CANDIDATES {
        if candidate == resolved_delimiter {
            continue;
        }
        if let Some(table) = parse_attempt(text, candidate)
            && table.headers.len() > 1
        {
            return table;
        }
    }

    if let Some(table) = reparse_from_header_line(text) {
        return table;
    }

    warn!("all parse strategies exhausted; returning an empty table");
    RawTable::empty()
}

fn parse_attempt(text: &str, delimiter: u8) -> Option<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(record) => record.iter().map(|cell| cell.to_string()).collect(),
        Err(err) => {
            warn!(
                "header parse failed with delimiter '{}': {err}",
                delimiter::printable(delimiter)
            );
            return None;
        }
    };

    let mut rows = Vec::new();
    let mut ragged = 0usize;
    for record in reader.records() {
        match record {
            Ok(record) => {
                if record.len() != headers.len() {
                    ragged += 1;
                }
                rows.push(record.iter().map(|cell| cell.to_string()).collect());
            }
            Err(err) => {
                warn!("skipping malformed row: {err}");
            }
        }
    }
    if ragged > 0 {
        warn!(
            "{ragged} row(s) did not match the {}-column header",
            headers.len()
        );
    }
    Some(RawTable { headers, rows })
}

/// Last structured attempt: some publications prepend preamble lines before
/// the real header row. Find the first line that both contains the default
/// delimiter and mentions a known header label, then re-parse from there.
fn reparse_from_header_line(text: &str) -> Option<RawTable> {
    let delimiter_char = delimiter::DEFAULT_DELIMITER as char;
    let start = text.lines().position(|line| {
        line.contains(delimiter_char) && resolve::mentions_known_header(line)
    })?;
    warn!("re-parsing from detected header at line {}", start + 1);
    let tail = text
        .lines()
        .skip(start)
        .collect::<Vec<_>>()
        .join("\n");
    let table = parse_attempt(&tail, delimiter::DEFAULT_DELIMITER)?;
    (table.headers.len() > 1).then_some(table)
}
