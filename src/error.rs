use thiserror::Error;

/// Failures that terminate a pipeline run.
///
/// Everything else (decode ambiguity, parse-ladder exhaustion, per-cell
/// coercion failures) is absorbed locally and replaced with a fallback value,
/// so callers only ever see a full result, an empty result, or one of these.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("failed to construct HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("transport failure contacting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("malformed catalog payload: {0}")]
    Catalog(#[source] serde_json::Error),
    #[error("could not identify an institution column in the report layout")]
    SchemaUnresolved,
}
