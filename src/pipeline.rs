//! End-to-end normalization: raw payload in, normalized table out.
//!
//! Every stage is a pure transformation of its input; the only failures that
//! escape are the fatal ones ([`RankingError::SchemaUnresolved`] here, the
//! transport errors at the fetch boundary). A payload that defeats the whole
//! parse ladder normalizes to an empty table, which callers must treat as
//! "no data for this query".

use log::{debug, info};

use crate::error::RankingError;
use crate::fetch::RawPayload;
use crate::record::NormalizedTable;
use crate::{delimiter, encoding, parse, resolve};

pub fn normalize(payload: &RawPayload) -> Result<NormalizedTable, RankingError> {
    let decoded = encoding::decode(&payload.bytes);
    debug!(
        "decoded {} byte(s) as {}",
        payload.bytes.len(),
        decoded.encoding
    );

    let resolved = delimiter::sniff_delimiter(&decoded.text);
    let table = parse::parse_table(&decoded.text, resolved);
    if table.is_empty() {
        info!("no tabular data recovered from payload");
        return Ok(NormalizedTable::empty());
    }
    debug!(
        "parsed {} column(s) x {} row(s)",
        table.headers.len(),
        table.rows.len()
    );

    let map = resolve::resolve_schema(&table)?;
    let normalized = NormalizedTable::from_raw(&table, &map);
    info!(
        "normalized {} record(s) under entity column '{}'",
        normalized.len(),
        normalized.entity_header
    );
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(text: &str) -> RawPayload {
        RawPayload {
            bytes: text.as_bytes().to_vec(),
            content_type: None,
        }
    }

    #[test]
    fn normalizes_a_well_formed_report() {
        let text = "Instituição financeira;Índice;Quantidade total de reclamações\n\
                    Banco A;5.151,40;120\n\
                    Banco B;4,00;35\n";
        let table = normalize(&payload(text)).expect("pipeline");
        assert_eq!(table.len(), 2);
        assert_eq!(table.entity_header, "Instituição financeira");
        assert_eq!(
            table.records[0].index_value,
            Some("5151.40".parse().unwrap())
        );
    }

    #[test]
    fn empty_payload_normalizes_to_an_empty_table() {
        let table = normalize(&payload("")).expect("pipeline");
        assert!(table.is_empty());
    }

    #[test]
    fn unresolvable_layout_is_fatal() {
        let text = ";\n0;1\n2;3\n";
        assert!(matches!(
            normalize(&payload(text)),
            Err(RankingError::SchemaUnresolved)
        ));
    }
}
